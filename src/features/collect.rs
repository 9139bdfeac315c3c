use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::clients::GmailClient;
use crate::clients::gmail_client::api::GmailMessage;
use crate::clients::gmail_client::header_value;
use crate::core::models::Newsletter;
use crate::errors::DigestError;
use crate::utils::mime::extract_body;

/// Gmail label newsletters are filed under.
pub const NEWSLETTER_LABEL: &str = "newsletter";

/// At most this many matching messages are fetched per call.
pub const MAX_NEWSLETTERS: usize = 10;

pub const DEFAULT_HOURS_BACK: i64 = 24;
pub const MIN_HOURS_BACK: i64 = 1;
pub const MAX_HOURS_BACK: i64 = 168;

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
pub const NO_CONTENT: &str = "[No content found]";

/// Reject look-back windows outside one hour to one week.
///
/// # Errors
///
/// Returns [`DigestError::Validation`] when `hours_back` is out of range.
pub fn validate_hours_back(hours_back: i64) -> Result<i64, DigestError> {
    if (MIN_HOURS_BACK..=MAX_HOURS_BACK).contains(&hours_back) {
        Ok(hours_back)
    } else {
        Err(DigestError::Validation(format!(
            "hours_back must be between {MIN_HOURS_BACK} and {MAX_HOURS_BACK}, got {hours_back}"
        )))
    }
}

/// Gmail search query for newsletters received on or after the cutoff day.
///
/// Gmail's `after:` operator only takes a date, so the cutoff is truncated to
/// the day it falls on.
#[must_use]
pub fn build_search_query(now: DateTime<Utc>, hours_back: i64) -> String {
    let cutoff = now - Duration::hours(hours_back);
    format!(
        "label:{NEWSLETTER_LABEL} after:{}",
        cutoff.date_naive().format("%Y/%m/%d")
    )
}

/// Map a full Gmail message into a [`Newsletter`], filling defaults for
/// missing headers and bodies.
#[must_use]
pub fn to_newsletter(message: &GmailMessage) -> Newsletter {
    let headers = message
        .payload
        .as_ref()
        .and_then(|p| p.headers.as_deref())
        .unwrap_or_default();

    let subject = header_value(headers, "Subject").unwrap_or(NO_SUBJECT);
    let sender = header_value(headers, "From").unwrap_or(UNKNOWN_SENDER);
    let content = message
        .payload
        .as_ref()
        .and_then(extract_body)
        .unwrap_or_else(|| NO_CONTENT.to_string());

    Newsletter {
        subject: subject.to_string(),
        sender: sender.to_string(),
        content,
    }
}

/// Fetch newsletters received within the last `hours_back` hours.
///
/// Token, search and validation failures abort the call. Individual message
/// fetches that fail are logged and skipped.
///
/// # Errors
///
/// Returns [`DigestError::Validation`] for an out-of-range window (before any
/// network call), and propagates token and search errors.
pub async fn fetch_newsletters(
    gmail: &GmailClient,
    hours_back: i64,
) -> Result<Vec<Newsletter>, DigestError> {
    let hours_back = validate_hours_back(hours_back)?;

    let access_token = gmail.access_token().await?;
    let query = build_search_query(Utc::now(), hours_back);
    let matches = gmail.search_messages(&access_token, &query).await?;

    if matches.is_empty() {
        info!(%query, "No newsletters matched");
        return Ok(Vec::new());
    }

    if matches.len() > MAX_NEWSLETTERS {
        info!(
            matched = matches.len(),
            limit = MAX_NEWSLETTERS,
            "Fetching only the most recent newsletters"
        );
    }

    let mut newsletters = Vec::with_capacity(matches.len().min(MAX_NEWSLETTERS));
    for message_ref in matches.iter().take(MAX_NEWSLETTERS) {
        match gmail.get_message(&access_token, &message_ref.id).await {
            Ok(message) => newsletters.push(to_newsletter(&message)),
            Err(e) => warn!(message_id = %message_ref.id, "Skipping newsletter: {}", e),
        }
    }

    info!(
        fetched = newsletters.len(),
        matched = matches.len(),
        "Collected newsletters"
    );
    Ok(newsletters)
}
