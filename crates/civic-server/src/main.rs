// Rust guideline compliant 2026-02-09

//! Standalone CivicConnect API server.
//!
//! Usage: `civic-server [DATA_DIR]`. The listen address and logging come
//! from the data directory's config and `CIVIC_*` variables.

use civic_server::{run, ServeOptions};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let mut options = ServeOptions::default();
    if let Some(dir) = std::env::args_os().nth(1) {
        options.data_dir = PathBuf::from(dir);
    }
    run(options)?;
    Ok(())
}
