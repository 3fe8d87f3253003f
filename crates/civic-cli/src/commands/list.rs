// Rust guideline compliant 2026-02-09

//! Implementation of the `civic list` command.
//!
//! Every filter accepts `all` to leave that field unconstrained.

use super::open_service;
use crate::OutputFormatter;
use anyhow::Result;
use civic_app::ListOptions;
use std::path::Path;

/// Filters and paging for `civic list`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Filter by status (reported, acknowledged, in_progress, ...)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by category id
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by department id
    #[arg(long)]
    pub department: Option<String>,

    /// Filter by reporter id
    #[arg(long)]
    pub reporter: Option<String>,

    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Filter by assignee
    #[arg(long)]
    pub assigned_to: Option<String>,

    /// Maximum number of issues to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of matching issues to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        Self {
            status: args.status,
            category: args.category,
            department: args.department,
            reporter: args.reporter,
            priority: args.priority,
            assigned_to: args.assigned_to,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

/// Lists issues newest first.
///
/// # Errors
///
/// Returns an error if the data directory is not initialized or a status
/// or priority filter is unknown.
pub fn execute(data_dir: &Path, args: ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let options = ListOptions::from(args);
    let service = open_service(data_dir)?;
    let issues = service.list(&options)?;
    let total = service.count(&options)?;
    println!("{}", formatter.format_list(&issues, total));
    Ok(())
}
