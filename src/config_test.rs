use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn api_key_only_uses_defaults() {
    let config = IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "key-123")])).unwrap();
    assert_eq!(config.api_key, "key-123");
    assert_eq!(config.google_client_id, None);
    assert_eq!(config.identity_endpoint, DEFAULT_IDENTITY_ENDPOINT);
    assert_eq!(config.redirect_path, DEFAULT_REDIRECT_PATH);
}

#[test]
fn missing_api_key_is_an_error() {
    let err = IdentityConfig::from_lookup(lookup(&[])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: API_KEY_VAR });
}

#[test]
fn blank_api_key_counts_as_missing() {
    let err = IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: API_KEY_VAR });
}

#[test]
fn endpoint_trailing_slash_is_trimmed() {
    let config = IdentityConfig::from_lookup(lookup(&[
        (API_KEY_VAR, "k"),
        (IDENTITY_ENDPOINT_VAR, "http://localhost:9099/identitytoolkit.googleapis.com/v1/"),
    ]))
    .unwrap();
    assert_eq!(config.identity_endpoint, "http://localhost:9099/identitytoolkit.googleapis.com/v1");
}

#[test]
fn endpoint_must_be_http() {
    let err = IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (IDENTITY_ENDPOINT_VAR, "ftp://example.com")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: IDENTITY_ENDPOINT_VAR, .. }));
}

#[test]
fn endpoint_must_parse() {
    let err = IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (IDENTITY_ENDPOINT_VAR, "not a url")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: IDENTITY_ENDPOINT_VAR, .. }));
}

#[test]
fn redirect_path_must_be_absolute() {
    let err = IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (REDIRECT_PATH_VAR, "callback")]))
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid TASKDECK_OAUTH_REDIRECT_PATH: must start with '/'");
}

#[test]
fn google_client_id_is_kept() {
    let config =
        IdentityConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (GOOGLE_CLIENT_ID_VAR, "abc.apps.googleusercontent.com")]))
            .unwrap();
    assert_eq!(config.google_client_id.as_deref(), Some("abc.apps.googleusercontent.com"));
}
