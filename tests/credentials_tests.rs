use box_files::box_api::credentials::{CredentialSource, resolve};
use box_files::core::config::AppConfig;
use box_files::errors::BoxError;
use std::collections::HashMap;

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|name| vars.get(name).cloned())
}

const EXPLICIT: [(&str, &str); 6] = [
    ("BOX_CLIENT_ID", "explicit"),
    ("BOX_CLIENT_SECRET", "secret"),
    ("BOX_JWT_KEY_ID", "kid"),
    ("BOX_PRIVATE_KEY", "-----BEGIN KEY-----\\nabc\\n-----END KEY-----"),
    ("BOX_PRIVATE_KEY_PASSPHRASE", "pw"),
    ("BOX_ENTERPRISE_ID", "123"),
];

#[test]
fn test_inline_json_ignores_incomplete_explicit_fields() {
    let inline = r#"{
        "boxAppSettings": {
            "clientID": "inline",
            "clientSecret": "s",
            "appAuth": { "publicKeyID": "k", "privateKey": "p", "passphrase": "pw" }
        },
        "userID": "42"
    }"#;
    // Explicit fields are incomplete but never looked at.
    let config = config_from(&[("BOX_JWT_CONFIG_JSON", inline), ("BOX_CLIENT_ID", "explicit")]);

    assert_eq!(
        CredentialSource::select(&config),
        CredentialSource::InlineJson(inline.to_string())
    );
    let resolved = resolve(&config).unwrap();
    assert_eq!(resolved.client_id, "inline");
    assert_eq!(resolved.user_id.as_deref(), Some("42"));
}

#[test]
fn test_blank_higher_priority_variables_are_skipped() {
    let mut vars = EXPLICIT.to_vec();
    vars.push(("BOX_CONFIG_FILE", ""));
    vars.push(("BOX_JWT_CONFIG_JSON", ""));

    let resolved = resolve(&config_from(&vars)).unwrap();
    assert_eq!(resolved.client_id, "explicit");
    assert_eq!(
        resolved.private_key,
        "-----BEGIN KEY-----\nabc\n-----END KEY-----"
    );
}

#[test]
fn test_explicit_fields_without_subject() {
    let vars: Vec<_> = EXPLICIT
        .iter()
        .copied()
        .filter(|(k, _)| *k != "BOX_ENTERPRISE_ID")
        .collect();

    let err = resolve(&config_from(&vars)).unwrap_err();
    assert!(matches!(err, BoxError::MissingSubject));
}
