use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoxError {
    #[error("Invalid Box configuration: {0}")]
    ConfigurationError(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Set BOX_USER_ID or BOX_ENTERPRISE_ID for JWT subject.")]
    MissingSubject,

    #[error("Failed to parse Box JWT config: {0}")]
    ParseError(String),

    #[error("Failed to authenticate with Box: {0}")]
    AuthError(String),

    #[error("Failed to access Box API: {0}")]
    RemoteCallError(String),
}

impl BoxError {
    /// Error for a required environment variable that is unset or empty.
    #[must_use]
    pub fn missing_env(name: &str) -> Self {
        BoxError::MissingEnv(name.to_string())
    }
}

impl From<reqwest::Error> for BoxError {
    fn from(error: reqwest::Error) -> Self {
        BoxError::RemoteCallError(error.to_string())
    }
}

impl From<serde_json::Error> for BoxError {
    fn from(error: serde_json::Error) -> Self {
        BoxError::ParseError(error.to_string())
    }
}

impl From<anyhow::Error> for BoxError {
    fn from(error: anyhow::Error) -> Self {
        BoxError::RemoteCallError(error.to_string())
    }
}
