use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Failed to obtain Gmail access token (status {status}): {body}")]
    UpstreamAuth { status: u16, body: String },

    #[error("Failed to fetch newsletters from Gmail: {0}")]
    UpstreamFetch(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to parse digest from model response: {0}")]
    UpstreamParse(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DigestError {
    /// Short machine-readable kind, used as the `error` field of HTTP error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DigestError::Validation(_) => "validation_error",
            DigestError::UpstreamAuth { .. } => "upstream_auth_error",
            DigestError::UpstreamFetch(_) => "upstream_fetch_error",
            DigestError::OpenAIError(_) => "upstream_completion_error",
            DigestError::UpstreamParse(_) => "upstream_parse_error",
            DigestError::HttpError(_) => "upstream_http_error",
            DigestError::Config(_) => "config_error",
        }
    }

    /// Whether the failure was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, DigestError::Validation(_))
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        DigestError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        DigestError::UpstreamParse(error.to_string())
    }
}

