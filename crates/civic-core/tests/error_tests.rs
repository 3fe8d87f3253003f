// Rust guideline compliant 2026-02-06

//! Unit tests for error types and messages.

use civic_core::{Error, Status};

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let msg = Error::Io(io_err).to_string();
    assert!(msg.contains("IO error"), "IO error should carry its prefix");
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    assert!(Error::Json(json_err).to_string().contains("JSON error"));
}

#[test]
fn test_validation_error_formatting() {
    let error = Error::Validation("title cannot be empty".to_string());
    assert_eq!(error.to_string(), "Validation failed: title cannot be empty");
}

#[test]
fn test_not_found_error_formatting() {
    let error = Error::NotFound("42".to_string());
    assert_eq!(error.to_string(), "Issue not found: 42");
}

#[test]
fn test_invalid_transition_formatting() {
    let error = Error::InvalidTransition {
        from: Status::Closed,
        to: Status::InProgress,
    };
    assert_eq!(
        error.to_string(),
        "Invalid status transition from closed to in_progress"
    );
}

#[test]
fn test_invalid_state_formatting() {
    let error = Error::InvalidState {
        status: Status::Reported,
        reason: "feedback is accepted only after resolution".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("reported"));
    assert!(msg.contains("feedback"));
}

#[test]
fn test_io_error_conversion() {
    fn fails() -> civic_core::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(Error::Io(_))));
}
