/// Newsletter Digest - turns a Gmail newsletter label into an LLM-written digest.
///
/// The service exposes three HTTP routes:
/// 1. `GET /grab-newsletters` fetches recent messages labeled `newsletter`
///    and normalizes them into `{subject, sender, content}` records
/// 2. `POST /summarize` sends a batch of newsletters to an `OpenAI` chat model
///    and returns a structured digest (`tldr` bullets plus themed `topics`)
/// 3. `GET /healthz` reports liveness
///
/// # Architecture
///
/// The system uses:
/// - axum for the HTTP surface
/// - reqwest for the Google OAuth2, Gmail and `OpenAI` calls
/// - openai-api-rs message types for chat prompts
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use newsletter_digest::api::{AppState, router};
/// use newsletter_digest::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     newsletter_digest::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let app = router(AppState::from_config(&config));
///
///     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;
pub mod utils;

pub use errors::DigestError;

/// Configure structured logging with JSON output.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Call once at startup.
///
/// # Example
///
/// ```
/// newsletter_digest::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
