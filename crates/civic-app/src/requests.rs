// Rust guideline compliant 2026-02-09

//! Request payloads accepted by the issue service.

use civic_core::{IssuePatch, Status};
use serde::Deserialize;

/// Body of a status transition request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusChangeRequest {
    /// Target status.
    #[serde(alias = "target_status")]
    pub status: Status,
    /// Acting user.
    pub user_id: String,
    /// Optional message for the audit entry.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a comment request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRequest {
    /// Acting user.
    pub user_id: String,
    /// Comment text.
    pub message: String,
    /// Whether citizens can see the comment.
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Body of an assignment request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignRequest {
    /// Acting user.
    pub user_id: String,
    /// Staff member to assign; blank clears.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Department to route to; blank clears.
    #[serde(default)]
    pub department_id: Option<String>,
}

/// Body of a citizen feedback request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackRequest {
    /// Acting user.
    pub user_id: String,
    /// Rating, 1 to 5.
    pub rating: u8,
    /// Free-text feedback.
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Body of a partial update request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatchRequest {
    /// Acting user.
    pub user_id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub patch: IssuePatch,
}
