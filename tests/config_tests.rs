use std::collections::HashMap;

use newsletter_digest::core::config::{
    AppConfig, DEFAULT_GMAIL_API_BASE, DEFAULT_GOOGLE_TOKEN_URL, DEFAULT_OPENAI_MODEL,
    DEFAULT_PORT,
};
use newsletter_digest::errors::DigestError;

fn required_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("OPENAI_API_KEY", "sk-test"),
        ("GMAIL_CLIENT_ID", "id"),
        ("GMAIL_CLIENT_SECRET", "secret"),
        ("GMAIL_REFRESH_TOKEN", "refresh"),
    ])
}

fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, DigestError> {
    AppConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_string()))
}

#[test]
fn test_defaults_apply_when_optional_vars_missing() {
    let config = load(&required_vars()).expect("config loads");

    assert_eq!(config.openai_api_key, "sk-test");
    assert_eq!(config.model_name(), DEFAULT_OPENAI_MODEL);
    assert_eq!(config.gmail_api_base, DEFAULT_GMAIL_API_BASE);
    assert_eq!(config.google_token_url, DEFAULT_GOOGLE_TOKEN_URL);
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.cache_access_token);
    assert!(config.openai_org_id.is_none());
}

#[test]
fn test_each_required_var_is_enforced() {
    for missing in ["OPENAI_API_KEY", "GMAIL_CLIENT_ID", "GMAIL_CLIENT_SECRET", "GMAIL_REFRESH_TOKEN"] {
        let mut vars = required_vars();
        vars.remove(missing);

        match load(&vars) {
            Err(DigestError::Config(msg)) => assert!(msg.contains(missing), "{msg}"),
            other => panic!("expected config error for {missing}, got {other:?}"),
        }
    }
}

#[test]
fn test_empty_required_var_counts_as_missing() {
    let mut vars = required_vars();
    vars.insert("GMAIL_REFRESH_TOKEN", "  ");
    assert!(matches!(load(&vars), Err(DigestError::Config(_))));
}

#[test]
fn test_optional_overrides() {
    let mut vars = required_vars();
    vars.insert("OPENAI_MODEL", "gpt-4o");
    vars.insert("OPENAI_ORG_ID", "org-1");
    vars.insert("PORT", "9090");
    vars.insert("GMAIL_CACHE_TOKEN", "true");

    let config = load(&vars).expect("config loads");
    assert_eq!(config.model_name(), "gpt-4o");
    assert_eq!(config.openai_org_id.as_deref(), Some("org-1"));
    assert_eq!(config.port, 9090);
    assert!(config.cache_access_token);
}

#[test]
fn test_invalid_port_is_rejected() {
    let mut vars = required_vars();
    vars.insert("PORT", "not-a-port");
    assert!(matches!(load(&vars), Err(DigestError::Config(msg)) if msg.starts_with("PORT")));
}
