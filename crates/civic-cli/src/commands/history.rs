// Rust guideline compliant 2026-02-09

//! Implementation of the `civic history` command.

use super::open_service;
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::parse_issue_id;
use std::path::Path;

/// Prints the audit trail of an issue, oldest first.
///
/// # Errors
///
/// Returns a not-found error if the id does not name an issue.
pub fn execute(
    data_dir: &Path,
    id: &str,
    public_only: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = parse_issue_id(id)?;
    let updates = open_service(data_dir)?.updates(id, public_only)?;
    println!("{}", formatter.format_updates(&updates));
    Ok(())
}
