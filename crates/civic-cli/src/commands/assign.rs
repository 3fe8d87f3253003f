// Rust guideline compliant 2026-02-09

//! Implementation of the `civic assign` command.

use super::{open_service, resolve_actor};
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::{parse_issue_id, AssignRequest};
use std::path::Path;

/// Assigns an issue to a staff member and/or routes it to a department.
///
/// An empty value clears the field.
///
/// # Errors
///
/// Returns an error if neither target is given, the issue is unknown, or
/// the department does not exist.
pub fn execute(
    data_dir: &Path,
    id: &str,
    assigned_to: Option<String>,
    department: Option<String>,
    user: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = parse_issue_id(id)?;
    let request = AssignRequest {
        user_id: resolve_actor(user),
        assigned_to,
        department_id: department,
    };
    let service = open_service(data_dir)?;
    service.assign(id, request)?;
    println!("{}", formatter.format_issue(&service.get(id, false)?));
    Ok(())
}
