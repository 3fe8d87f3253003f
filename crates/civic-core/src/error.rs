// Rust guideline compliant 2026-02-06

//! Error types for the CivicConnect core library.

use crate::Status;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for issue store, query and lifecycle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing or a value is out of range.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Issue not found.
    #[error("Issue not found: {0}")]
    NotFound(String),

    /// The requested status edge is not part of the lifecycle.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status of the issue.
        from: Status,
        /// Requested target status.
        to: Status,
    },

    /// The issue is in a state where the operation is not permitted.
    #[error("Operation not allowed while issue is {status}: {reason}")]
    InvalidState {
        /// Current status of the issue.
        status: Status,
        /// What was attempted.
        reason: String,
    },

    /// The issue was written by another handle after it was read.
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// Invalid configuration file or environment override.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The persistent journal violates a store invariant.
    #[error("Corrupt journal: {0}")]
    Corrupt(String),
}
