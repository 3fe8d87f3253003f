// Rust guideline compliant 2026-02-09

//! Command implementations for the CivicConnect CLI.

pub mod assign;
pub mod catalog;
pub mod comment;
pub mod create;
pub mod feedback;
pub mod history;
pub mod init;
pub mod list;
pub mod serve;
pub mod show;
pub mod stats;
pub mod transition;
pub mod update;

use anyhow::Result;
use civic_app::{DataContext, IssueService};
use std::env;
use std::path::Path;

/// Fallback actor when no identity is configured.
pub const DEFAULT_ACTOR: &str = "staff";

/// Opens the issue service over an initialized data directory.
///
/// # Errors
///
/// Returns an error if the directory is not initialized or the config or
/// journal cannot be loaded.
pub fn open_service(data_dir: &Path) -> Result<IssueService> {
    let context = DataContext::discover(data_dir)?;
    let config = context.load_config()?;
    Ok(context.open_service(&config)?)
}

/// Resolves the acting user for audit entries.
///
/// Falls back to `CIVIC_USER`, then the system username.
pub fn resolve_actor(user: Option<String>) -> String {
    user.into_iter()
        .chain(env::var("CIVIC_USER").ok())
        .chain(env::var("USER").ok())
        .chain(env::var("USERNAME").ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_actor_wins() {
        assert_eq!(resolve_actor(Some("crew-7".to_string())), "crew-7");
    }

    #[test]
    fn test_blank_actor_falls_through() {
        assert!(!resolve_actor(Some("  ".to_string())).trim().is_empty());
    }
}
