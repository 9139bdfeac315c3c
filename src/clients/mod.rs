//! Client modules for external API interactions

pub mod gmail_client;
pub mod llm_client;
pub mod token_client;

pub use gmail_client::GmailClient;
pub use llm_client::LlmClient;
pub use token_client::{OAuthTokenProvider, StaticToken, TokenSource};
