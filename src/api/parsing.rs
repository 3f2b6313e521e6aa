//! Invocation event parsing.
//!
//! Events arrive either as direct invokes (`{"folderId": "..."}`) or as API
//! Gateway proxy events carrying `pathParameters` / `queryStringParameters`.
//! Everything here is a pure function of the event and the config.

use serde_json::Value;

use crate::box_api::ListParams;
use crate::core::config::AppConfig;

pub const DEFAULT_FOLDER_ID: &str = "0";
pub const DEFAULT_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

/// Event locations consulted for the folder id, highest priority first.
const FOLDER_ID_CANDIDATES: [&[&str]; 3] = [
    &["folderId"],
    &["pathParameters", "folderId"],
    &["queryStringParameters", "folderId"],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub folder_id: String,
    pub params: ListParams,
}

impl ListRequest {
    #[must_use]
    pub fn from_event(event: &Value, config: &AppConfig) -> Self {
        let folder_id = resolve_folder_id(event, config.default_folder_id.as_deref());
        let limit = parse_optional_int(param(event, "limit"), DEFAULT_LIMIT);
        let offset = parse_optional_int(param(event, "offset"), DEFAULT_OFFSET);
        let fields = parse_optional_csv(param(event, "fields"));

        Self {
            folder_id,
            params: ListParams {
                limit,
                offset,
                fields,
            },
        }
    }
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

/// Render a scalar (or array of scalars) the way it would appear in a query string.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_as_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// `null`, `false`, `0` and `""` count as not provided.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// First non-blank candidate, then the configured default, then `"0"`.
#[must_use]
pub fn resolve_folder_id(event: &Value, default: Option<&str>) -> String {
    FOLDER_ID_CANDIDATES
        .iter()
        .filter_map(|path| v_path(event, path).filter(|v| !is_blank(v)))
        .filter_map(value_as_text)
        .find(|id| !id.is_empty())
        .or_else(|| default.filter(|d| !d.is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FOLDER_ID.to_string())
}

/// The top-level event field, or the query-string field when the former is
/// absent or null.
#[must_use]
pub fn param<'a>(event: &'a Value, name: &str) -> Option<&'a Value> {
    event
        .get(name)
        .filter(|v| !v.is_null())
        .or_else(|| v_path(event, &["queryStringParameters", name]).filter(|v| !v.is_null()))
}

/// Parse a leading base-10 integer: optional whitespace, optional sign, digits.
/// Trailing characters are ignored (`"12abc"` is 12).
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Integer parameter with silent fallback for missing or malformed input.
#[must_use]
pub fn parse_optional_int(value: Option<&Value>, fallback: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(fallback),
        Some(Value::String(s)) => parse_int_prefix(s).unwrap_or(fallback),
        _ => fallback,
    }
}

/// Split a comma-separated list, trimming and dropping empty items.
/// An empty result means "not provided".
#[must_use]
pub fn parse_optional_csv(value: Option<&Value>) -> Option<Vec<String>> {
    let raw = value.filter(|v| !is_blank(v)).and_then(value_as_text)?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() { None } else { Some(items) }
}
