// Rust guideline compliant 2026-02-09

//! Implementation of the `civic init` command.

use crate::OutputFormatter;
use anyhow::Result;
use civic_app::DataContext;
use serde_json::json;
use std::path::Path;

/// Creates the data directory with a default configuration.
///
/// Running it again keeps the existing config and journal.
///
/// # Errors
///
/// Returns an error if the directory or config file cannot be written.
pub fn execute(data_dir: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = DataContext::init(data_dir)?;
    let payload = json!({
        "data_dir": context.data_dir(),
        "config": context.config_path(),
        "journal": context.journal_path(),
    });
    let message = format!(
        "Initialized CivicConnect data directory at {}",
        context.data_dir().display()
    );
    println!("{}", formatter.format_notice(&message, &payload));
    Ok(())
}
