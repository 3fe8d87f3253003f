// Rust guideline compliant 2026-02-09

//! Implementation of the `civic update` command.
//!
//! Applies several field changes as one atomic patch. A status change in
//! the patch follows the lifecycle rules; if it is refused nothing else in
//! the patch is applied either.

use super::{open_service, resolve_actor};
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::{parse_issue_id, parse_priority, parse_status, PatchRequest};
use civic_core::IssuePatch;
use std::path::Path;

/// Field changes for `civic update`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateArgs {
    /// Issue id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Target status
    #[arg(long)]
    pub status: Option<String>,

    /// Note recorded with a status change
    #[arg(long)]
    pub message: Option<String>,

    /// Acting staff member
    #[arg(long)]
    pub user: Option<String>,
}

/// Applies a partial update to an issue.
///
/// # Errors
///
/// Returns an error, changing nothing, if any part of the update fails.
pub fn execute(data_dir: &Path, args: UpdateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let id = parse_issue_id(&args.id)?;
    let patch = IssuePatch {
        title: args.title,
        description: args.description,
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        status: args.status.as_deref().map(parse_status).transpose()?,
        message: args.message,
        ..IssuePatch::default()
    };
    let request = PatchRequest {
        user_id: resolve_actor(args.user),
        patch,
    };
    let service = open_service(data_dir)?;
    service.patch(id, request)?;
    println!("{}", formatter.format_issue(&service.get(id, false)?));
    Ok(())
}
