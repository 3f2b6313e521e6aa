use std::env;

/// Raw settings read from the Lambda environment.
///
/// Every value is optional here; deciding which combination is valid is the
/// job of [`crate::box_api::credentials::resolve`]. Empty strings are stored
/// as `None` so an exported-but-blank variable behaves like an unset one.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config_file: Option<String>,
    pub jwt_config_json: Option<String>,
    pub jwt_config_json_base64: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub jwt_key_id: Option<String>,
    pub private_key: Option<String>,
    pub private_key_passphrase: Option<String>,
    pub user_id: Option<String>,
    pub enterprise_id: Option<String>,
    pub as_user_id: Option<String>,
    pub default_folder_id: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            config_file: get("BOX_CONFIG_FILE"),
            jwt_config_json: get("BOX_JWT_CONFIG_JSON"),
            jwt_config_json_base64: get("BOX_JWT_CONFIG_JSON_BASE64"),
            client_id: get("BOX_CLIENT_ID"),
            client_secret: get("BOX_CLIENT_SECRET"),
            jwt_key_id: get("BOX_JWT_KEY_ID"),
            private_key: get("BOX_PRIVATE_KEY"),
            private_key_passphrase: get("BOX_PRIVATE_KEY_PASSPHRASE"),
            user_id: get("BOX_USER_ID"),
            enterprise_id: get("BOX_ENTERPRISE_ID"),
            as_user_id: get("BOX_AS_USER_ID"),
            default_folder_id: get("BOX_FOLDER_ID"),
        }
    }
}
