// Rust guideline compliant 2026-02-06

//! CivicConnect Core Library
//!
//! This crate provides the foundational components of the municipal issue
//! service:
//! - Data models (Issue, IssueUpdate, Status, Priority)
//! - Reference catalog (departments, categories, citizens)
//! - Storage interface with in-memory and JSONL journal backends
//! - Filter/query engine with deterministic ordering and pagination
//! - FSM logic and the status transition handler
//! - Read projections and dashboard statistics
//! - Error types and configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod fsm;
pub mod lifecycle;
pub mod models;
pub mod projection;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, Citizen, Department, IssueCategory, Role};
pub use config::{Config, LogFormat, StorageKind};
pub use error::{Error, Result};
pub use fsm::validate_transition;
pub use lifecycle::{IssuePatch, TransitionRequest};
pub use models::{
    Issue, IssueDraft, IssueUpdate, Location, NewUpdate, Priority, Status, UpdateType, ANONYMOUS,
};
pub use projection::{IssueDetail, IssueView};
pub use query::{IssueFilter, Pagination};
pub use stats::Stats;
pub use storage::{Committed, JsonlBackend, MemoryBackend, StorageBackend};
pub use store::IssueStore;
