use super::*;

#[test]
fn resolve_endpoint_defaults_when_unset() {
    assert_eq!(resolve_endpoint(None), DEFAULT_ENDPOINT);
}

#[test]
fn resolve_endpoint_defaults_when_blank() {
    assert_eq!(resolve_endpoint(Some("  ")), DEFAULT_ENDPOINT);
}

#[test]
fn resolve_endpoint_uses_trimmed_override() {
    assert_eq!(
        resolve_endpoint(Some(" https://bot.example.test/dev/chatbot ")),
        "https://bot.example.test/dev/chatbot"
    );
}

#[test]
fn new_config_has_no_credentials() {
    let config = ClientConfig::new("/dev/chatbot");
    assert!(config.credentials.is_none());
    assert!(config.authorization().is_none());
}

#[test]
fn authorization_comes_from_identity_token() {
    let config = ClientConfig::new("/dev/chatbot").with_credentials(Some(Credentials {
        id_token: "id-123".to_owned(),
        access_token: Some("acc-456".to_owned()),
    }));
    assert_eq!(config.authorization(), Some("id-123"));
}
