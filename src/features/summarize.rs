use serde_json::Value;
use tracing::{info, warn};

use crate::clients::LlmClient;
use crate::core::models::{Digest, Newsletter};
use crate::errors::DigestError;
use crate::prompt::{MAX_THEMES, SYSTEM_INSTRUCTION, build_digest_prompt};

/// Generate a digest for the given newsletters.
///
/// The empty check runs before any external call.
///
/// # Errors
///
/// Returns [`DigestError::Validation`] for an empty list,
/// [`DigestError::UpstreamParse`] when the model output does not contain a
/// digest-shaped JSON object, and propagates completion errors.
pub async fn summarize_newsletters(
    llm: &LlmClient,
    newsletters: &[Newsletter],
) -> Result<Digest, DigestError> {
    if newsletters.is_empty() {
        return Err(DigestError::Validation("No newsletters provided".to_string()));
    }

    let prompt = build_digest_prompt(newsletters);
    info!(
        newsletters = newsletters.len(),
        prompt_chars = prompt.len(),
        "Generating digest"
    );

    let raw = llm
        .complete(llm.build_messages(SYSTEM_INSTRUCTION, &prompt))
        .await?;

    parse_digest(&raw)
}

/// Parse the span from the first `{` to the last `}` of free text.
///
/// # Errors
///
/// Returns [`DigestError::UpstreamParse`] when no `{ ... }` span exists or
/// the span is not valid JSON.
pub fn extract_json_object(raw: &str) -> Result<Value, DigestError> {
    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(DigestError::UpstreamParse(
                "no JSON object found in model response".to_string(),
            ));
        }
    };

    serde_json::from_str(span).map_err(DigestError::from)
}

/// Parse the model response into a typed [`Digest`].
///
/// # Errors
///
/// Returns [`DigestError::UpstreamParse`] when the JSON cannot be located,
/// does not parse, or lacks the `tldr`/`topics` shape.
pub fn parse_digest(raw: &str) -> Result<Digest, DigestError> {
    let value = extract_json_object(raw)?;
    let digest: Digest = serde_json::from_value(value)?;

    if !(4..=6).contains(&digest.tldr.len()) {
        warn!(bullets = digest.tldr.len(), "TL;DR bullet count outside 4-6");
    }
    if digest.topics.len() > MAX_THEMES {
        warn!(topics = digest.topics.len(), "Digest has more themes than requested");
    }

    Ok(digest)
}
