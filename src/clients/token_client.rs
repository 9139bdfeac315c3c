//! OAuth2 refresh-token exchange for Gmail access tokens

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::core::config::AppConfig;
use crate::errors::DigestError;

/// Cached tokens are treated as expired this long before their real deadline.
const EXPIRY_BUFFER_SECS: i64 = 300;

/// Anything that can hand out a bearer token for the Gmail API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DigestError::UpstreamAuth`] when the provider rejects the
    /// exchange, or [`DigestError::HttpError`] on transport failure.
    async fn access_token(&self) -> Result<String, DigestError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges a long-lived refresh token for short-lived access tokens.
///
/// Every call performs a fresh exchange unless caching was enabled, in which
/// case a token is reused until shortly before it expires.
pub struct OAuthTokenProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    cache: Option<Mutex<Option<CachedToken>>>,
}

impl OAuthTokenProvider {
    #[must_use]
    pub fn new(
        http: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        refresh_token: String,
    ) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            refresh_token,
            cache: None,
        }
    }

    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        let provider = Self::new(
            http,
            config.google_token_url.clone(),
            config.gmail_client_id.clone(),
            config.gmail_client_secret.clone(),
            config.gmail_refresh_token.clone(),
        );
        if config.cache_access_token {
            provider.with_cache()
        } else {
            provider
        }
    }

    #[must_use]
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Mutex::new(None));
        self
    }

    /// Perform one `grant_type=refresh_token` exchange. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::UpstreamAuth`] with the provider's status and
    /// body when the endpoint answers with a non-success status.
    pub async fn exchange(&self) -> Result<(String, Option<i64>), DigestError> {
        debug!(token_url = %self.token_url, "Exchanging refresh token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = status.as_u16(), "Token exchange rejected");
            return Err(DigestError::UpstreamAuth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| DigestError::UpstreamAuth {
            status: status.as_u16(),
            body: format!("unreadable token response: {e}"),
        })?;

        Ok((token.access_token, token.expires_in))
    }
}

#[async_trait]
impl TokenSource for OAuthTokenProvider {
    async fn access_token(&self) -> Result<String, DigestError> {
        let Some(cache) = &self.cache else {
            return self.exchange().await.map(|(token, _)| token);
        };

        let mut slot = cache.lock().await;
        if let Some(cached) = slot.as_ref()
            && cached.expires_at > Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS)
        {
            return Ok(cached.access_token.clone());
        }

        let (access_token, expires_in) = self.exchange().await?;
        match expires_in {
            Some(secs) => {
                info!(expires_in = secs, "Caching Gmail access token");
                *slot = Some(CachedToken {
                    access_token: access_token.clone(),
                    expires_at: Utc::now() + Duration::seconds(secs),
                });
            }
            None => *slot = None,
        }
        Ok(access_token)
    }
}

/// A fixed token, for callers that manage authentication themselves.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, DigestError> {
        Ok(self.0.clone())
    }
}
