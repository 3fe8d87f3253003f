// Rust guideline compliant 2026-02-09

//! Implementation of the `civic serve` command.

use anyhow::Result;
use civic_server::ServeOptions;
use std::path::{Path, PathBuf};

/// Runs the HTTP API in the foreground until interrupted.
///
/// # Arguments
///
/// * `data_dir` - Initialized data directory
/// * `addr` - Listen address overriding the configured one
/// * `log_file` - Optional log file instead of stderr
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the address bound.
pub fn execute(data_dir: &Path, addr: Option<String>, log_file: Option<PathBuf>) -> Result<()> {
    civic_app::DataContext::discover(data_dir)?;
    civic_server::run(ServeOptions {
        data_dir: data_dir.to_path_buf(),
        addr,
        log_file,
    })?;
    Ok(())
}
