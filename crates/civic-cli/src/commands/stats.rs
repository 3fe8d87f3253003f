// Rust guideline compliant 2026-02-09

//! Implementation of the `civic stats` command.

use super::open_service;
use crate::OutputFormatter;
use anyhow::Result;
use std::path::Path;

/// Prints dashboard statistics over all issues.
///
/// # Errors
///
/// Returns an error if the data directory is not initialized.
pub fn execute(data_dir: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let stats = open_service(data_dir)?.stats()?;
    println!("{}", formatter.format_stats(&stats));
    Ok(())
}
