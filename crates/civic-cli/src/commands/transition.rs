// Rust guideline compliant 2026-02-09

//! Implementation of the `civic transition` command.

use super::{open_service, resolve_actor};
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::{parse_issue_id, parse_status, StatusChangeRequest};
use std::path::Path;

/// Moves an issue to a new status.
///
/// # Arguments
///
/// * `id` - Issue id
/// * `status` - Target status name
/// * `user` - Acting staff member
/// * `message` - Optional note for the audit entry
///
/// # Errors
///
/// Returns an error if the issue is unknown, the status name is invalid,
/// or the lifecycle does not allow the move.
pub fn execute(
    data_dir: &Path,
    id: &str,
    status: &str,
    user: Option<String>,
    message: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = parse_issue_id(id)?;
    let request = StatusChangeRequest {
        status: parse_status(status)?,
        user_id: resolve_actor(user),
        message,
    };
    let service = open_service(data_dir)?;
    service.transition(id, request)?;
    println!("{}", formatter.format_issue(&service.get(id, false)?));
    Ok(())
}
