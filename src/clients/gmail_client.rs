//! Gmail REST API client
//!
//! Only the two read endpoints the newsletter fetcher needs: message search
//! and full message detail.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, error};

use super::token_client::TokenSource;
use crate::errors::DigestError;

/// Gmail API response types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Response from listing messages
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: String,
        pub thread_id: Option<String>,
    }

    /// Full message from `messages.get?format=full`
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        pub snippet: Option<String>,
        pub payload: Option<MessagePart>,
    }

    /// One node of the payload tree; the top-level payload has the same shape.
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePart {
        pub mime_type: Option<String>,
        pub headers: Option<Vec<Header>>,
        pub body: Option<MessageBody>,
        pub parts: Option<Vec<MessagePart>>,
    }

    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct Header {
        pub name: String,
        pub value: String,
    }

    /// Message body (base64url encoded)
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    pub struct MessageBody {
        pub size: Option<u64>,
        pub data: Option<String>,
    }
}

use api::{GmailMessage, Header, ListMessagesResponse, MessageRef};

/// Value of the first header named exactly `name`. Matching is case-sensitive.
#[must_use]
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

/// Client for the signed-in user's mailbox (`users/me`).
pub struct GmailClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl GmailClient {
    #[must_use]
    pub fn new(http: Client, base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Obtain a bearer token from the configured source.
    ///
    /// # Errors
    ///
    /// Propagates the token source's error unchanged.
    pub async fn access_token(&self) -> Result<String, DigestError> {
        self.tokens.access_token().await
    }

    /// Search the mailbox with a Gmail query string (`label:x after:y`).
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::UpstreamFetch`] on transport failure, a
    /// non-success status, or an unreadable body.
    pub async fn search_messages(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Vec<MessageRef>, DigestError> {
        let url = format!("{}/users/me/messages", self.base_url);
        debug!(%query, "Searching Gmail messages");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| DigestError::UpstreamFetch(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = status.as_u16(), "Gmail search failed");
            return Err(DigestError::UpstreamFetch(format!(
                "search returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let list: ListMessagesResponse = response
            .json()
            .await
            .map_err(|e| DigestError::UpstreamFetch(format!("unreadable search response: {e}")))?;

        Ok(list.messages.unwrap_or_default())
    }

    /// Fetch one message in `full` format.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::UpstreamFetch`] on transport failure, a
    /// non-success status, or an unreadable body. Callers fetching many
    /// messages are expected to skip individual failures.
    pub async fn get_message(
        &self,
        access_token: &str,
        message_id: &str,
    ) -> Result<GmailMessage, DigestError> {
        let url = format!(
            "{}/users/me/messages/{}",
            self.base_url,
            urlencoding::encode(message_id)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("format", "full")])
            .send()
            .await
            .map_err(|e| DigestError::UpstreamFetch(format!("message {message_id}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::UpstreamFetch(format!(
                "message {message_id} returned {}",
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DigestError::UpstreamFetch(format!("message {message_id}: {e}")))
    }
}
