//! HTTP service facade

pub mod handler;
pub mod helpers;

// Re-export the router for the binary
pub use handler::{AppState, router};
