//! Box API client
//!
//! Wraps the authenticated HTTP calls this function needs. No retries: a
//! failed call fails the invocation.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{info, warn};

use super::auth::BoxJwtAuth;
use super::credentials;
use crate::core::config::AppConfig;
use crate::errors::BoxError;

pub const API_BASE_URL: &str = "https://api.box.com/2.0";

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Query parameters for a folder items listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
    pub fields: Option<Vec<String>>,
}

impl ListParams {
    /// Query pairs in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(fields) = self.fields.as_ref().filter(|f| !f.is_empty()) {
            pairs.push(("fields", fields.join(",")));
        }
        pairs
    }
}

/// The remote operation the handler depends on.
#[async_trait]
pub trait FolderItemsApi: Send + Sync {
    /// List the immediate children of `folder_id`, returning Box's JSON object.
    async fn get_folder_items(
        &self,
        folder_id: &str,
        params: &ListParams,
    ) -> Result<Map<String, Value>, BoxError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
}

fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) else {
        return format!("HTTP {status}");
    };

    let mut msg = format!("HTTP {status}");
    if let Some(code) = err.code {
        msg.push_str(&format!(" {code}"));
    }
    if let Some(message) = err.message {
        msg.push_str(&format!(": {message}"));
    }
    if let Some(request_id) = err.request_id {
        msg.push_str(&format!(" (request id {request_id})"));
    }
    msg
}

/// `{base}/folders/{folder_id}/items`, with the id encoded as one path segment.
///
/// # Errors
///
/// Returns [`BoxError::RemoteCallError`] for an empty, `.` or `..` folder id
/// and [`BoxError::ConfigurationError`] for an unusable base URL.
pub fn folder_items_url(base: &str, folder_id: &str) -> Result<Url, BoxError> {
    if matches!(folder_id, "" | "." | "..") {
        return Err(BoxError::RemoteCallError(format!(
            "invalid folder id {folder_id:?}"
        )));
    }

    let mut url = Url::parse(base)
        .map_err(|e| BoxError::ConfigurationError(format!("invalid API base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| BoxError::ConfigurationError(format!("invalid API base URL {base}")))?
        .pop_if_empty()
        .push("folders")
        .push(folder_id)
        .push("items");
    Ok(url)
}

/// Authenticated Box client.
pub struct BoxClient {
    auth: BoxJwtAuth,
    http: Client,
    api_base_url: String,
}

impl BoxClient {
    #[must_use]
    pub fn new(auth: BoxJwtAuth) -> Self {
        Self {
            auth,
            http: HTTP_CLIENT.clone(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root, e.g. a local mock server.
    #[must_use]
    pub fn with_api_base_url(self, api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..self
        }
    }

    /// Resolve credentials and build a client, acting as `BOX_AS_USER_ID`
    /// when that is set.
    ///
    /// # Errors
    ///
    /// Returns an error if credential resolution or key loading fails.
    pub fn from_config(config: &AppConfig) -> Result<Self, BoxError> {
        let jwt_config = credentials::resolve(config)?;
        let auth = BoxJwtAuth::new(jwt_config)?;
        let auth = match &config.as_user_id {
            Some(user_id) => {
                info!(as_user_id = %user_id, "Using Box user subject");
                auth.with_user_subject(user_id)
            }
            None => auth,
        };
        Ok(Self::new(auth))
    }

    #[must_use]
    pub fn auth(&self) -> &BoxJwtAuth {
        &self.auth
    }
}

#[async_trait]
impl FolderItemsApi for BoxClient {
    async fn get_folder_items(
        &self,
        folder_id: &str,
        params: &ListParams,
    ) -> Result<Map<String, Value>, BoxError> {
        let url = folder_items_url(&self.api_base_url, folder_id)?;
        let token = self.auth.access_token(&self.http).await?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&params.query_pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let msg = describe_api_error(status, &body);
            warn!(folder_id = %folder_id, "Box folder items call failed: {}", msg);
            return Err(BoxError::RemoteCallError(msg));
        }

        let body: Value = resp.json().await?;
        match body {
            Value::Object(map) => Ok(map),
            other => Err(BoxError::RemoteCallError(format!(
                "unexpected folder items response: {other}"
            ))),
        }
    }
}
