//! Access tokens via the Box JWT grant, cached until shortly before expiry.

use chrono::{DateTime, Duration, Utc};
use openssl::pkey::{PKey, Private};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
use tracing::info;

use super::credentials::JwtConfig;
use super::jwt::{self, Subject, TOKEN_URL};
use crate::errors::BoxError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Tokens are refreshed this long before Box says they expire.
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    refresh_after: DateTime<Utc>,
}

/// JWT authentication for one subject.
pub struct BoxJwtAuth {
    config: JwtConfig,
    key: PKey<Private>,
    subject: Subject,
    token_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl BoxJwtAuth {
    /// # Errors
    ///
    /// Returns an error if the private key cannot be decrypted or the config
    /// names no subject.
    pub fn new(config: JwtConfig) -> Result<Self, BoxError> {
        let subject = Subject::from_config(&config).ok_or(BoxError::MissingSubject)?;
        let key = jwt::load_private_key(&config)?;
        Ok(Self {
            config,
            key,
            subject,
            token_url: TOKEN_URL.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Exchange assertions at another endpoint, e.g. a local mock server.
    /// The assertion audience stays Box's token URL.
    #[must_use]
    pub fn with_token_url(self, token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            ..self
        }
    }

    /// Same credentials, acting as the given user.
    #[must_use]
    pub fn with_user_subject(self, user_id: &str) -> Self {
        Self {
            subject: Subject::User(user_id.to_string()),
            token: Mutex::new(None),
            ..self
        }
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.token.lock().ok()?;
        guard
            .as_ref()
            .filter(|t| now < t.refresh_after)
            .map(|t| t.value.clone())
    }

    fn store_token(&self, value: &str, expires_in: i64, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(CachedToken {
                value: value.to_string(),
                refresh_after: now + Duration::seconds(expires_in - EXPIRY_MARGIN_SECS),
            });
        }
    }

    /// Return a valid access token, requesting a new one when needed.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::AuthError`] if Box rejects the assertion or the
    /// token response cannot be read.
    pub async fn access_token(&self, http: &Client) -> Result<String, BoxError> {
        let now = Utc::now();
        if let Some(token) = self.cached_token(now) {
            return Ok(token);
        }

        let assertion = jwt::sign_assertion(&self.config, &self.key, &self.subject, now.timestamp())?;
        let form = [
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let resp = http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| BoxError::AuthError(format!("token request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Option<TokenErrorResponse> = resp.json().await.ok();
            let detail = body
                .map(|b| {
                    let error = b.error.unwrap_or_else(|| "unknown".to_string());
                    match b.error_description {
                        Some(desc) => format!("{error}: {desc}"),
                        None => error,
                    }
                })
                .unwrap_or_else(|| "unknown".to_string());
            return Err(BoxError::AuthError(format!("HTTP {status} {detail}")));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| BoxError::AuthError(format!("token response parse: {e}")))?;

        info!(
            subject_type = self.subject.box_sub_type(),
            expires_in = token.expires_in,
            "Obtained Box access token"
        );
        self.store_token(&token.access_token, token.expires_in, now);
        Ok(token.access_token)
    }
}
