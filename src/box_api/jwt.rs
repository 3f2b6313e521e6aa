//! Signed JWT assertions for the Box `jwt-bearer` grant.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::sign::Signer;
use serde::Serialize;
use uuid::Uuid;

use super::credentials::JwtConfig;
use crate::errors::BoxError;

pub const TOKEN_URL: &str = "https://api.box.com/oauth2/token";

/// Box rejects assertions that expire more than 60 seconds out.
pub const ASSERTION_LIFETIME_SECS: i64 = 30;

/// Identity the access token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Enterprise(String),
    User(String),
}

impl Subject {
    /// Enterprise subject when the config carries one, otherwise the user.
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Option<Self> {
        config
            .enterprise_id
            .clone()
            .map(Subject::Enterprise)
            .or_else(|| config.user_id.clone().map(Subject::User))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Subject::Enterprise(id) | Subject::User(id) => id,
        }
    }

    #[must_use]
    pub fn box_sub_type(&self) -> &'static str {
        match self {
            Subject::Enterprise(_) => "enterprise",
            Subject::User(_) => "user",
        }
    }
}

#[derive(Debug, Serialize)]
struct AssertionHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    kid: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AssertionClaims<'a> {
    pub iss: &'a str,
    pub sub: &'a str,
    pub box_sub_type: &'static str,
    pub aud: &'static str,
    pub jti: String,
    pub exp: i64,
}

/// Decrypt the PEM private key with its passphrase.
///
/// # Errors
///
/// Returns [`BoxError::ConfigurationError`] if the key cannot be decrypted.
pub fn load_private_key(config: &JwtConfig) -> Result<PKey<Private>, BoxError> {
    PKey::private_key_from_pem_passphrase(
        config.private_key.as_bytes(),
        config.private_key_passphrase.as_bytes(),
    )
    .map_err(|e| BoxError::ConfigurationError(format!("failed to load private key: {e}")))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, BoxError> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(value)?))
}

/// Build and sign an RS256 assertion for `subject`, expiring
/// [`ASSERTION_LIFETIME_SECS`] after `now` (unix seconds).
///
/// # Errors
///
/// Returns an error if the claims cannot be serialized or signing fails.
pub fn sign_assertion(
    config: &JwtConfig,
    key: &PKey<Private>,
    subject: &Subject,
    now: i64,
) -> Result<String, BoxError> {
    let header = AssertionHeader {
        alg: "RS256",
        typ: "JWT",
        kid: &config.jwt_key_id,
    };
    let claims = AssertionClaims {
        iss: &config.client_id,
        sub: subject.id(),
        box_sub_type: subject.box_sub_type(),
        aud: TOKEN_URL,
        jti: Uuid::new_v4().simple().to_string(),
        exp: now + ASSERTION_LIFETIME_SECS,
    };

    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);

    let mut signer = Signer::new(MessageDigest::sha256(), key)
        .map_err(|e| BoxError::AuthError(format!("signer init: {e}")))?;
    signer
        .update(signing_input.as_bytes())
        .map_err(|e| BoxError::AuthError(format!("signer update: {e}")))?;
    let signature = signer
        .sign_to_vec()
        .map_err(|e| BoxError::AuthError(format!("sign assertion: {e}")))?;

    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
}
