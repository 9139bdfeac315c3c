//! HTTP routes: newsletter collection, digest generation and health.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::clients::{GmailClient, LlmClient, OAuthTokenProvider, TokenSource};
use crate::core::config::AppConfig;
use crate::core::models::{Digest, NewsletterBatch};
use crate::errors::DigestError;
use crate::features::collect::{DEFAULT_HOURS_BACK, fetch_newsletters, validate_hours_back};
use crate::features::summarize::summarize_newsletters;

/// Clients shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub gmail: Arc<GmailClient>,
    pub llm: Arc<LlmClient>,
}

impl AppState {
    #[must_use]
    pub fn new(gmail: GmailClient, llm: LlmClient) -> Self {
        Self {
            gmail: Arc::new(gmail),
            llm: Arc::new(llm),
        }
    }

    /// Build all upstream clients over one shared connection pool.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();
        let tokens: Arc<dyn TokenSource> =
            Arc::new(OAuthTokenProvider::from_config(http.clone(), config));
        let gmail = GmailClient::new(http.clone(), &config.gmail_api_base, tokens);
        let llm = LlmClient::from_config(http, config);
        Self::new(gmail, llm)
    }
}

#[derive(Debug, Deserialize)]
pub struct GrabParams {
    pub hours_back: Option<i64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/grab-newsletters", get(grab_newsletters))
        .route("/summarize", post(summarize))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /grab-newsletters?hours_back=N`
///
/// # Errors
///
/// 400 for an out-of-range `hours_back`; 500 when the token exchange or the
/// Gmail search fails.
pub async fn grab_newsletters(
    State(state): State<AppState>,
    Query(params): Query<GrabParams>,
) -> Result<Json<NewsletterBatch>, DigestError> {
    let hours_back = validate_hours_back(params.hours_back.unwrap_or(DEFAULT_HOURS_BACK))?;
    let span = info_span!("grab_newsletters", request_id = %Uuid::new_v4(), hours_back);

    async move {
        let newsletters = fetch_newsletters(&state.gmail, hours_back).await?;
        info!(count = newsletters.len(), "Returning newsletters");
        Ok::<_, DigestError>(Json(NewsletterBatch { newsletters }))
    }
    .instrument(span)
    .await
}

/// `POST /summarize`
///
/// # Errors
///
/// 400 for an empty newsletter list; 500 when the completion fails or its
/// output is not a digest.
pub async fn summarize(
    State(state): State<AppState>,
    Json(batch): Json<NewsletterBatch>,
) -> Result<Json<Digest>, DigestError> {
    let span = info_span!(
        "summarize",
        request_id = %Uuid::new_v4(),
        newsletters = batch.newsletters.len()
    );

    async move {
        let digest = summarize_newsletters(&state.llm, &batch.newsletters).await?;
        info!(
            tldr = digest.tldr.len(),
            topics = digest.topics.len(),
            "Digest generated"
        );
        Ok::<_, DigestError>(Json(digest))
    }
    .instrument(span)
    .await
}

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
