// Rust guideline compliant 2026-02-09

//! Implementation of the `civic catalog` command.

use super::open_service;
use crate::OutputFormatter;
use anyhow::Result;
use std::path::Path;

/// Prints the active departments and categories.
///
/// # Errors
///
/// Returns an error if the data directory is not initialized or the
/// catalog file is invalid.
pub fn execute(data_dir: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let service = open_service(data_dir)?;
    println!(
        "{}",
        formatter.format_catalog(&service.departments(), &service.categories())
    );
    Ok(())
}
