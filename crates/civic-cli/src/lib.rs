// Rust guideline compliant 2026-02-09

//! CivicConnect CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod output;
pub mod terminal;

pub use output::{create_formatter, envelope, OutputFormatter};
pub use terminal::should_use_color;
