use std::env;

use crate::errors::DigestError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub openai_api_base: String,
    pub gmail_client_id: String,
    pub gmail_client_secret: String,
    pub gmail_refresh_token: String,
    pub gmail_api_base: String,
    pub google_token_url: String,
    pub cache_access_token: bool,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Config`] naming the first required variable that
    /// is missing or empty, or an optional variable that fails to parse.
    pub fn from_env() -> Result<Self, DigestError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| DigestError::Config(format!("{name} must be set")))
        };

        let port = match optional("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| DigestError::Config(format!("PORT: {e}")))?,
            None => DEFAULT_PORT,
        };

        let cache_access_token = match optional("GMAIL_CACHE_TOKEN") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| DigestError::Config(format!("GMAIL_CACHE_TOKEN: invalid flag {raw:?}")))?,
            None => false,
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: optional("OPENAI_ORG_ID"),
            openai_model: optional("OPENAI_MODEL"),
            openai_api_base: optional("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            gmail_client_id: required("GMAIL_CLIENT_ID")?,
            gmail_client_secret: required("GMAIL_CLIENT_SECRET")?,
            gmail_refresh_token: required("GMAIL_REFRESH_TOKEN")?,
            gmail_api_base: optional("GMAIL_API_BASE")
                .unwrap_or_else(|| DEFAULT_GMAIL_API_BASE.to_string()),
            google_token_url: optional("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string()),
            cache_access_token,
            port,
        })
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.openai_model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
