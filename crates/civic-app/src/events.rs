// Rust guideline compliant 2026-02-09

//! Change events published after each committed mutation.

use chrono::{DateTime, Utc};
use civic_core::{IssueUpdate, Status};
use serde::Serialize;

/// What kind of mutation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new issue was reported.
    Created,
    /// The issue moved to a new status.
    StatusChanged,
    /// A comment was added.
    Commented,
    /// Assignee or department changed.
    Assigned,
    /// Citizen feedback was recorded.
    Feedback,
    /// A partial update was applied.
    Updated,
}

impl EventKind {
    /// Returns the wire name, used as the SSE event name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "created",
            EventKind::StatusChanged => "status_changed",
            EventKind::Commented => "commented",
            EventKind::Assigned => "assigned",
            EventKind::Feedback => "feedback",
            EventKind::Updated => "updated",
        }
    }
}

/// A committed change to one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueEvent {
    /// Mutation kind.
    pub kind: EventKind,
    /// Affected issue.
    pub issue_id: u64,
    /// Status after the change.
    pub status: Status,
    /// Audit entries appended by the change.
    pub updates: Vec<IssueUpdate>,
    /// Commit time.
    pub at: DateTime<Utc>,
}

/// Receiver of committed change events.
///
/// Implementations must not block; the service publishes while holding its
/// writer lock.
pub trait EventSink: Send + Sync {
    /// Delivers one event.
    fn publish(&self, event: IssueEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: IssueEvent) {}
}
