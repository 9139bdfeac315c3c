//! Configuration and request-scoped data types

pub mod config;
pub mod models;
