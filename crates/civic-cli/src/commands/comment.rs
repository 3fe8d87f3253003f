// Rust guideline compliant 2026-02-09

//! Implementation of the `civic comment` command.

use super::{open_service, resolve_actor};
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::{parse_issue_id, CommentRequest};
use std::path::Path;

/// Adds a comment to an issue.
///
/// Private comments are kept from the citizen-facing trail.
///
/// # Errors
///
/// Returns an error if the issue is unknown or the message is blank.
pub fn execute(
    data_dir: &Path,
    id: &str,
    message: String,
    user: Option<String>,
    private: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = parse_issue_id(id)?;
    let request = CommentRequest {
        user_id: resolve_actor(user),
        message,
        is_public: !private,
    };
    let update = open_service(data_dir)?.add_comment(id, request)?;
    println!("{}", formatter.format_updates(&[update]));
    Ok(())
}
