// Rust guideline compliant 2026-02-09

//! Shared application services for CivicConnect.
//!
//! This crate provides the non-transport layer used by both the HTTP server
//! and the CLI: data directory handling, the single-writer issue service,
//! change events, input parsing, and standardized response envelopes.

pub mod context;
pub mod error;
pub mod events;
pub mod list;
pub mod requests;
pub mod response;
pub mod service;
pub mod time;

pub use context::{DataContext, JOURNAL_FILE};
pub use error::{AppError, ErrorCode, Result};
pub use events::{EventKind, EventSink, IssueEvent, NoopSink};
pub use list::{parse_issue_id, parse_priority, parse_status, ListOptions};
pub use requests::{
    AssignRequest, CommentRequest, FeedbackRequest, PatchRequest, StatusChangeRequest,
};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use service::IssueService;
pub use time::{Clock, FixedClock, SystemClock};
