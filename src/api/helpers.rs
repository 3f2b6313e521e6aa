//! Response envelope builders.

use serde_json::{Map, Value, json};

use crate::errors::BoxError;

pub const LIST_FAILURE_LABEL: &str = "Failed to list Box folder items";

/// Returns an API Gateway style response with a JSON body.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "content-type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns a 200 response with `folderId` merged into the Box result.
#[must_use]
pub fn ok_listing(folder_id: &str, result: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("folderId".to_string(), Value::String(folder_id.to_string()));
    body.extend(result);
    json_response(200, &Value::Object(body))
}

/// Returns the 500 response for any failure along the listing path.
#[must_use]
pub fn err_listing(error: &BoxError) -> Value {
    json_response(
        500,
        &json!({ "error": LIST_FAILURE_LABEL, "message": error.to_string() }),
    )
}
