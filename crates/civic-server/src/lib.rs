// Rust guideline compliant 2026-02-09

//! HTTP API for CivicConnect.
//!
//! Exposes the issue service over REST with an SSE change feed.

pub mod api;
pub mod error;
pub mod events;
pub mod server;

pub use api::{router, AppState};
pub use error::ApiError;
pub use events::EventHub;
pub use server::{init_tracing, run, ServeOptions, ServerError};
