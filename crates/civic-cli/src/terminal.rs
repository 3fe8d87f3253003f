// Rust guideline compliant 2026-02-09

//! Terminal capability detection.

use std::env;
use std::io::IsTerminal;

/// Determines if colored output should be used.
///
/// Respects the `NO_COLOR` environment variable and requires stdout to be
/// a terminal.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}
