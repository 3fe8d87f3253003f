// Rust guideline compliant 2026-02-09

//! Implementation of the `civic show` command.

use super::open_service;
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::parse_issue_id;
use std::path::Path;

/// Shows an issue with its audit trail.
///
/// # Arguments
///
/// * `id` - Issue id
/// * `public_only` - Hide internal audit entries, as citizens see it
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
    let service = open_service(data_dir)?;
    let detail = service.get(id, public_only)?;
    println!("{}", formatter.format_issue(&detail));
    Ok(())
}
