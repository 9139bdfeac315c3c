//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the chat-completion call used to produce digests.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::core::config::AppConfig;
use crate::errors::DigestError;

/// Sampling temperature for digest generation.
pub const DIGEST_TEMPERATURE: f64 = 0.4;

/// Output ceiling for one digest; generous so long batches are not cut off.
pub const MAX_OUTPUT_TOKENS: u32 = 4_000;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// LLM API client for generating digests
pub struct LlmClient {
    http: Client,
    api_base: String,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(
        http: Client,
        api_base: &str,
        api_key: String,
        org_id: Option<String>,
        model_name: String,
    ) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            org_id,
            model_name,
        }
    }

    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            &config.openai_api_base,
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.model_name().to_string(),
        )
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// System + user message pair for one completion.
    #[must_use]
    pub fn build_messages(&self, system: &str, user: &str) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(system.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(user.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }

    /// Send a chat completion and return the raw text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::HttpError`] if the request cannot be sent and
    /// [`DigestError::OpenAIError`] if the API answers with a failure status
    /// or a body without message text.
    pub async fn complete(&self, messages: Vec<ChatCompletionMessage>) -> Result<String, DigestError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", messages);

        let estimated_input_tokens = messages
            .iter()
            .map(|msg| match &msg.content {
                Content::Text(text) => estimate_tokens(text),
                other => estimate_tokens(&format!("{other:?}")),
            })
            .sum::<usize>();

        info!(
            model = %self.model_name,
            messages = messages.len(),
            estimated_input_tokens,
            "Requesting chat completion"
        );

        let input_messages: Vec<Value> = messages
            .iter()
            .map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };
                let content_val = match &msg.content {
                    Content::Text(text) => json!(text),
                    other => json!(format!("{other:?}")),
                };
                json!({
                    "role": role_str,
                    "content": content_val
                })
            })
            .collect();

        let request_body = json!({
            "model": self.model_name,
            "messages": input_messages,
            "temperature": DIGEST_TEMPERATURE,
            "max_tokens": MAX_OUTPUT_TOKENS
        });

        let mut request = self
            .http
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("OpenAI API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::OpenAIError(format!(
                "status {status}: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            DigestError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        response_json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| DigestError::OpenAIError("No text in response".to_string()))
    }
}
