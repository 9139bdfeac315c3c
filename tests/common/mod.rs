#![allow(dead_code)]

use newsletter_digest::core::config::AppConfig;
use serde_json::{Value, json};

/// Config whose upstreams all point at one mock server.
pub fn test_config(uri: &str) -> AppConfig {
    AppConfig {
        openai_api_key: "sk-test".to_string(),
        openai_org_id: None,
        openai_model: Some("test-model".to_string()),
        openai_api_base: uri.to_string(),
        gmail_client_id: "client-id".to_string(),
        gmail_client_secret: "client-secret".to_string(),
        gmail_refresh_token: "refresh-token".to_string(),
        gmail_api_base: format!("{uri}/gmail/v1"),
        google_token_url: format!("{uri}/token"),
        cache_access_token: false,
        port: 0,
    }
}

/// `messages.get?format=full` body for a single-part plain text message.
pub fn gmail_message(id: &str, subject: &str, from: &str, body_b64: &str) -> Value {
    json!({
        "id": id,
        "threadId": format!("thread-{id}"),
        "snippet": "snippet",
        "payload": {
            "mimeType": "text/plain",
            "headers": [
                {"name": "Subject", "value": subject},
                {"name": "From", "value": from}
            ],
            "body": {"size": 5, "data": body_b64}
        }
    })
}

/// `messages.list` body for the given ids.
pub fn message_list(ids: &[String]) -> Value {
    let messages: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "threadId": format!("thread-{id}")}))
        .collect();
    json!({ "messages": messages, "resultSizeEstimate": ids.len() })
}

/// Chat completion response whose first choice carries `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

pub const DIGEST_JSON: &str = r#"{
  "tldr": [
    "Chip makers report record quarterly demand",
    "Central bank holds rates steady again",
    "New open-source model tops benchmarks",
    "Startup funding rebounds in Europe"
  ],
  "topics": [
    {
      "name": "AI",
      "items": [
        {"headline": "A new open model was released. It beats prior results. Weights are public.", "source": "The Batch"}
      ]
    },
    {
      "name": "Markets",
      "items": [
        {"headline": "Rates were held. Inflation cooled. Markets rallied.", "source": "Morning Brew"}
      ]
    }
  ]
}"#;
