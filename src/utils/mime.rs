//! MIME utilities for Gmail message payloads

use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::clients::gmail_client::api::MessagePart;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

/// Find and decode the first textual body in a Gmail payload tree.
///
/// `text/plain` anywhere in the tree wins over `text/html`; within one MIME
/// type the first non-empty leaf in depth-first pre-order is returned.
/// Returns `None` when the tree has no decodable textual leaf.
#[must_use]
pub fn extract_body(payload: &MessagePart) -> Option<String> {
    find_body_of_type(payload, TEXT_PLAIN).or_else(|| find_body_of_type(payload, TEXT_HTML))
}

/// Depth-first search for the first non-empty body of the given MIME type.
#[must_use]
pub fn find_body_of_type(part: &MessagePart, mime_type: &str) -> Option<String> {
    if let Some(children) = part.parts.as_ref().filter(|p| !p.is_empty()) {
        return children
            .iter()
            .find_map(|child| find_body_of_type(child, mime_type));
    }

    if !part
        .mime_type
        .as_deref()
        .is_some_and(|m| canonical_mime(m) == mime_type)
    {
        return None;
    }

    part.body
        .as_ref()
        .and_then(|b| b.data.as_deref())
        .and_then(decode_body_data)
        .filter(|text| !text.is_empty())
}

/// Decode Gmail body data.
///
/// Gmail sends URL-safe base64, but padding varies between messages, so every
/// common alphabet/padding combination is tried. Invalid UTF-8 sequences are
/// replaced rather than rejected.
#[must_use]
pub fn decode_body_data(data: &str) -> Option<String> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let engines: [&GeneralPurpose; 4] = [&URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD, &STANDARD_NO_PAD];
    engines
        .iter()
        .find_map(|engine| engine.decode(compact.as_bytes()).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Strip parameters and normalize case: `Text/Plain; charset=UTF-8` -> `text/plain`.
#[must_use]
pub fn canonical_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
