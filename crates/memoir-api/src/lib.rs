//! memoir-api: Typed HTTP client for the diary backend
//!
//! This crate wraps the backend's JSON-over-HTTP endpoints (save, analyze,
//! list, dashboard summary) behind a small typed client.

pub mod client;
pub mod error;
pub mod types;

pub use client::DiaryClient;
pub use error::{Error, Result};
pub use types::*;
