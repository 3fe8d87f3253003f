// Rust guideline compliant 2026-02-06

//! Core data models for CivicConnect issues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor recorded for submissions without a reporter identity.
pub const ANONYMOUS: &str = "anonymous";

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Submitted by a citizen, not yet triaged.
    Reported,
    /// Seen and accepted by staff.
    Acknowledged,
    /// Work is underway.
    InProgress,
    /// Work is complete.
    Resolved,
    /// Resolution confirmed, no further work.
    Closed,
    /// Not actionable (duplicate, out of jurisdiction, ...).
    Rejected,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 6] = [
        Status::Reported,
        Status::Acknowledged,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
        Status::Rejected,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Reported => "reported",
            Status::Acknowledged => "acknowledged",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
            Status::Rejected => "rejected",
        }
    }

    /// Returns true for logical end states.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Resolved | Status::Closed | Status::Rejected)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Cosmetic or non-blocking.
    Low,
    /// Default for most reports.
    #[default]
    Medium,
    /// Safety relevant.
    High,
    /// Emergency response required.
    Urgent,
}

impl Priority {
    /// Returns the wire name of the priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// Free-form note, including detail edits.
    Comment,
    /// Status moved along the lifecycle.
    StatusChange,
    /// Assignee or department changed.
    Assignment,
    /// Citizen feedback on a resolved issue.
    Resolution,
}

impl UpdateType {
    /// Returns the wire name of the update type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Comment => "comment",
            UpdateType::StatusChange => "status_change",
            UpdateType::Assignment => "assignment",
            UpdateType::Resolution => "resolution",
        }
    }
}

/// Where an issue was observed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Street address or free-form description.
    #[serde(default)]
    pub address: String,
    /// Latitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Location {
    /// Validates the coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if only one coordinate is present or a coordinate
    /// is out of range.
    pub fn validate(&self) -> crate::Result<()> {
        match (self.lat, self.lng) {
            (None, None) => Ok(()),
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(crate::Error::Validation(format!(
                        "Latitude must be within -90..=90, got {lat}"
                    )));
                }
                if !(-180.0..=180.0).contains(&lng) {
                    return Err(crate::Error::Validation(format!(
                        "Longitude must be within -180..=180, got {lng}"
                    )));
                }
                Ok(())
            }
            _ => Err(crate::Error::Validation(
                "Latitude and longitude must be given together".to_string(),
            )),
        }
    }
}

/// A citizen-reported municipal problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Store-assigned identifier, increasing with insertion order.
    pub id: u64,
    /// One-line summary.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Category taxonomy reference.
    pub category_id: String,
    /// Current lifecycle status.
    pub status: Status,
    /// Urgency.
    pub priority: Priority,
    /// Reported location.
    #[serde(default)]
    pub location: Location,
    /// Submitting citizen, `None` when anonymous.
    #[serde(default)]
    pub reporter_id: Option<String>,
    /// Staff member responsible for the issue.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Department responsible for the issue.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Uploaded media references.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last mutation.
    pub updated_at: DateTime<Utc>,
    /// Target date derived from the category SLA.
    #[serde(default)]
    pub estimated_resolution_date: Option<DateTime<Utc>>,
    /// Time the issue reached `resolved`.
    #[serde(default)]
    pub actual_resolution_date: Option<DateTime<Utc>>,
    /// Citizen rating (1-5), only after resolution.
    #[serde(default)]
    pub citizen_rating: Option<u8>,
    /// Citizen feedback text, only after resolution.
    #[serde(default)]
    pub citizen_feedback: Option<String>,
}

impl Issue {
    /// Validates the stored invariants of an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Title, description or category is empty
    /// - The location is invalid
    /// - A rating is out of range or present before resolution
    pub fn validate(&self) -> crate::Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("category", &self.category_id)?;
        self.location.validate()?;

        if let Some(rating) = self.citizen_rating {
            validate_rating(rating)?;
            if !matches!(self.status, Status::Resolved | Status::Closed) {
                return Err(crate::Error::Validation(format!(
                    "Issue {} carries a rating while {}",
                    self.id, self.status
                )));
            }
        }

        Ok(())
    }
}

/// Append-only audit record of a change to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueUpdate {
    /// Store-assigned identifier, increasing with insertion order.
    pub id: u64,
    /// Owning issue.
    pub issue_id: u64,
    /// Acting user.
    pub user_id: String,
    /// Kind of change.
    pub update_type: UpdateType,
    /// Human-readable description of the change.
    pub message: String,
    /// Status before a status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<Status>,
    /// Status after a status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<Status>,
    /// Whether citizens can see the entry.
    pub is_public: bool,
    /// Time the entry was recorded.
    pub created_at: DateTime<Utc>,
}

/// Audit entry before the store assigns its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUpdate {
    /// Acting user.
    pub user_id: String,
    /// Kind of change.
    pub update_type: UpdateType,
    /// Human-readable description of the change.
    pub message: String,
    /// Status before a status change.
    pub old_status: Option<Status>,
    /// Status after a status change.
    pub new_status: Option<Status>,
    /// Whether citizens can see the entry.
    pub is_public: bool,
}

impl NewUpdate {
    /// Creates a public comment entry.
    pub fn comment(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            update_type: UpdateType::Comment,
            message: message.into(),
            old_status: None,
            new_status: None,
            is_public: true,
        }
    }

    /// Creates a status change entry.
    pub fn status_change(
        user_id: impl Into<String>,
        old_status: Option<Status>,
        new_status: Status,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            update_type: UpdateType::StatusChange,
            message: message.into(),
            old_status,
            new_status: Some(new_status),
            is_public: true,
        }
    }

    /// Creates an assignment entry.
    pub fn assignment(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            update_type: UpdateType::Assignment,
            message: message.into(),
            old_status: None,
            new_status: None,
            is_public: true,
        }
    }

    /// Creates a resolution entry.
    pub fn resolution(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            update_type: UpdateType::Resolution,
            message: message.into(),
            old_status: None,
            new_status: None,
            is_public: true,
        }
    }

    /// Sets the visibility flag.
    #[must_use]
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Stamps the entry with its identity.
    #[must_use]
    pub fn into_update(self, id: u64, issue_id: u64, created_at: DateTime<Utc>) -> IssueUpdate {
        IssueUpdate {
            id,
            issue_id,
            user_id: self.user_id,
            update_type: self.update_type,
            message: self.message,
            old_status: self.old_status,
            new_status: self.new_status,
            is_public: self.is_public,
            created_at,
        }
    }
}

/// A citizen submission before it becomes an issue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueDraft {
    /// One-line summary.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Category taxonomy reference.
    #[serde(alias = "category")]
    pub category_id: String,
    /// Reported location.
    #[serde(default)]
    pub location: Location,
    /// Explicit priority, overriding the category default.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Submitting citizen, `None` when anonymous.
    #[serde(default, alias = "reporter")]
    pub reporter_id: Option<String>,
    /// Uploaded media references.
    #[serde(default, alias = "photos")]
    pub image_urls: Vec<String>,
}

impl IssueDraft {
    /// Creates a draft with the required fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    /// Validates the draft against submission rules.
    ///
    /// # Arguments
    ///
    /// * `max_images` - Maximum number of image references accepted
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is empty, too many images are
    /// attached, or the location is invalid.
    pub fn validate(&self, max_images: usize) -> crate::Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("category", &self.category_id)?;

        if self.image_urls.len() > max_images {
            return Err(crate::Error::Validation(format!(
                "At most {} images may be attached, got {}",
                max_images,
                self.image_urls.len()
            )));
        }
        if self.image_urls.iter().any(|url| url.trim().is_empty()) {
            return Err(crate::Error::Validation(
                "Image references cannot be empty".to_string(),
            ));
        }

        self.location.validate()
    }
}

/// Fails with a validation error when `value` is blank.
pub(crate) fn require_text(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::Error::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Checks a citizen rating is within 1..=5.
pub(crate) fn validate_rating(rating: u8) -> crate::Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(crate::Error::Validation(format!(
            "Rating must be 1-5, got {rating}"
        )));
    }
    Ok(())
}

/// Returns `value` trimmed, or `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
