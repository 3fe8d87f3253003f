// Rust guideline compliant 2026-02-09

//! Error handling for CivicConnect application services.

use civic_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for API and CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested issue was not found.
    NotFound,
    /// Input validation failed.
    ValidationError,
    /// The requested state transition is invalid.
    InvalidTransition,
    /// The request included invalid inputs.
    InvalidInput,
    /// The issue kept changing underneath the request.
    Conflict,
    /// IO failure while reading or writing the data directory.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
    /// Configuration could not be loaded.
    ConfigError,
    /// The journal violates a store invariant.
    StorageError,
    /// The data directory has not been initialized.
    NotInitialized,
    /// A fallback for unexpected errors.
    Unknown,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Data directory is missing.
    #[error("CivicConnect data directory not initialized at {path}. Run 'civic init' first.")]
    NotInitialized {
        /// Path where the data directory was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotInitialized { .. } => ErrorCode::NotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::Validation(_) => ErrorCode::ValidationError,
                CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
                CoreError::InvalidState { .. } => ErrorCode::InvalidTransition,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
                CoreError::Config(_) => ErrorCode::ConfigError,
                CoreError::Corrupt(_) => ErrorCode::StorageError,
                CoreError::Conflict(_) => ErrorCode::Conflict,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::NotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::InvalidInput(_) | AppError::Io(_) => None,
            AppError::Core(core) => match core {
                CoreError::InvalidTransition { from, to } => Some(serde_json::json!({
                    "from": from,
                    "to": to,
                    "allowed": from.valid_transitions(),
                })),
                CoreError::InvalidState { status, .. } => Some(serde_json::json!({
                    "status": status,
                })),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_core::Status;

    #[test]
    fn test_transition_details_list_allowed_targets() {
        let error = AppError::from(CoreError::InvalidTransition {
            from: Status::Acknowledged,
            to: Status::Closed,
        });
        assert_eq!(error.code(), ErrorCode::InvalidTransition);
        let details = error.details().unwrap();
        assert_eq!(details["from"], "acknowledged");
        assert_eq!(details["allowed"], serde_json::json!(["in_progress", "rejected"]));
    }

    #[test]
    fn test_feedback_state_error_is_transition_coded() {
        let error = AppError::from(CoreError::InvalidState {
            status: Status::Reported,
            reason: "not yet".to_string(),
        });
        assert_eq!(error.code(), ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_code_wire_names() {
        assert_eq!(
            serde_json::to_value(ErrorCode::ValidationError).unwrap(),
            "validation_error"
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::NotFound).unwrap(),
            "not_found"
        );
    }

    #[test]
    fn test_write_conflict_code() {
        let error = AppError::from(CoreError::Conflict("issue 3 changed".to_string()));
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(serde_json::to_value(error.code()).unwrap(), "conflict");
        assert!(error.details().is_none());
    }

    #[test]
    fn test_not_initialized_mentions_init() {
        let error = AppError::NotInitialized {
            path: PathBuf::from(".civic"),
        };
        assert!(error.to_string().contains("civic init"));
        assert_eq!(error.code(), ErrorCode::NotInitialized);
    }
}
