// Rust guideline compliant 2026-02-09

//! Implementation of the `civic feedback` command.

use super::{open_service, resolve_actor};
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::{parse_issue_id, FeedbackRequest};
use std::path::Path;

/// Records a citizen rating on a resolved or closed issue.
///
/// # Errors
///
/// Returns an error if the issue is unknown, not yet resolved, or the
/// rating is outside 1..=5.
pub fn execute(
    data_dir: &Path,
    id: &str,
    rating: u8,
    feedback: Option<String>,
    user: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = parse_issue_id(id)?;
    let request = FeedbackRequest {
        user_id: resolve_actor(user),
        rating,
        feedback,
    };
    let service = open_service(data_dir)?;
    service.submit_feedback(id, request)?;
    println!("{}", formatter.format_issue(&service.get(id, false)?));
    Ok(())
}
