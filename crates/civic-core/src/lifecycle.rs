// Rust guideline compliant 2026-02-06

//! Status transition handler and the other validated issue mutations.
//!
//! Every mutation reads the issue, validates the whole change, and only
//! then hands the store a single commit carrying the new issue row and its
//! audit entries. A commit that loses a race with another handle is read
//! and validated again.

use crate::models::{non_blank, require_text, validate_rating};
use crate::storage::{Commit, Committed, IssueWrite};
use crate::store::IssueStore;
use crate::{Error, Issue, Location, NewUpdate, Priority, Result, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to move an issue along its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Issue to transition.
    pub issue_id: u64,
    /// Target status.
    #[serde(alias = "target_status")]
    pub status: Status,
    /// Acting user.
    pub user_id: String,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

impl TransitionRequest {
    /// Creates a request without a message.
    pub fn new(issue_id: u64, status: Status, user_id: impl Into<String>) -> Self {
        Self {
            issue_id,
            status,
            user_id: user_id.into(),
            message: None,
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Generic partial update of an issue.
///
/// A blank `assigned_to` or `department_id` clears the field. A present
/// `status` goes through the lifecycle rules like any other transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuePatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// New location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Replacement image references.
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    /// New assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// New department.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Target status.
    #[serde(default)]
    pub status: Option<Status>,
    /// Message for the status change entry.
    #[serde(default)]
    pub message: Option<String>,
}

impl IssuePatch {
    /// Returns true if the patch names no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.location.is_none()
            && self.image_urls.is_none()
            && self.assigned_to.is_none()
            && self.department_id.is_none()
            && self.status.is_none()
    }
}

/// Default message of a status change entry.
#[must_use]
pub fn default_transition_message(target: Status) -> String {
    format!("Status updated to {}", target)
}

/// Moves `issue` to `target`, stamping the resolution date when resolved.
fn apply_status(issue: &mut Issue, target: Status, now: DateTime<Utc>) -> Result<Status> {
    let old = issue.status;
    old.can_transition_to(target)?;
    issue.status = target;
    if target == Status::Resolved {
        issue.actual_resolution_date = Some(now);
    }
    Ok(old)
}

impl IssueStore {
    /// Applies a status transition and appends its audit entry atomically.
    ///
    /// # Arguments
    ///
    /// * `request` - The transition request
    /// * `now` - Transition timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issue is unknown
    /// - The acting user is blank
    /// - The edge is not part of the lifecycle (the issue is left unchanged)
    pub fn transition(&mut self, request: TransitionRequest, now: DateTime<Utc>) -> Result<Committed> {
        self.with_retry(|store| store.try_transition(request.clone(), now))
    }

    fn try_transition(&mut self, request: TransitionRequest, now: DateTime<Utc>) -> Result<Committed> {
        require_text("user_id", &request.user_id)?;
        let mut issue = self.get(request.issue_id)?;
        let old = apply_status(&mut issue, request.status, now)?;
        let message =
            non_blank(request.message).unwrap_or_else(|| default_transition_message(request.status));

        self.commit(Commit {
            issue: IssueWrite::Replace(issue),
            updates: vec![NewUpdate::status_change(
                request.user_id.trim(),
                Some(old),
                request.status,
                message,
            )],
            at: now,
        })
    }

    /// Adds a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is unknown or the message or user is
    /// blank.
    pub fn add_comment(
        &mut self,
        issue_id: u64,
        user_id: &str,
        message: &str,
        is_public: bool,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        self.with_retry(|store| store.try_add_comment(issue_id, user_id, message, is_public, now))
    }

    fn try_add_comment(
        &mut self,
        issue_id: u64,
        user_id: &str,
        message: &str,
        is_public: bool,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        require_text("user_id", user_id)?;
        require_text("message", message)?;
        let issue = self.get(issue_id)?;

        self.commit(Commit {
            issue: IssueWrite::Replace(issue),
            updates: vec![NewUpdate::comment(user_id.trim(), message.trim()).public(is_public)],
            at: now,
        })
    }

    /// Assigns an issue to a staff member and/or routes it to a department.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issue is unknown
    /// - Neither field is given
    /// - The department is not in the catalog
    pub fn assign(
        &mut self,
        issue_id: u64,
        user_id: &str,
        assigned_to: Option<String>,
        department_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        self.with_retry(|store| {
            store.try_assign(issue_id, user_id, assigned_to.clone(), department_id.clone(), now)
        })
    }

    fn try_assign(
        &mut self,
        issue_id: u64,
        user_id: &str,
        assigned_to: Option<String>,
        department_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        require_text("user_id", user_id)?;
        if assigned_to.is_none() && department_id.is_none() {
            return Err(Error::Validation(
                "assignment requires an assignee or a department".to_string(),
            ));
        }

        let mut issue = self.get(issue_id)?;
        let messages = self.apply_assignment(&mut issue, assigned_to, department_id)?;
        let message = if messages.is_empty() {
            "Assignment confirmed".to_string()
        } else {
            messages.join("; ")
        };

        self.commit(Commit {
            issue: IssueWrite::Replace(issue),
            updates: vec![NewUpdate::assignment(user_id.trim(), message)],
            at: now,
        })
    }

    /// Records citizen feedback on a resolved or closed issue.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issue is unknown
    /// - The issue is not resolved or closed
    /// - The rating is outside 1..=5
    pub fn submit_feedback(
        &mut self,
        issue_id: u64,
        user_id: &str,
        rating: u8,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        self.with_retry(|store| {
            store.try_submit_feedback(issue_id, user_id, rating, feedback.clone(), now)
        })
    }

    fn try_submit_feedback(
        &mut self,
        issue_id: u64,
        user_id: &str,
        rating: u8,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        require_text("user_id", user_id)?;
        validate_rating(rating)?;
        let mut issue = self.get(issue_id)?;
        if !matches!(issue.status, Status::Resolved | Status::Closed) {
            return Err(Error::InvalidState {
                status: issue.status,
                reason: "feedback is accepted only after resolution".to_string(),
            });
        }

        let feedback = non_blank(feedback);
        let message = match &feedback {
            Some(text) => format!("Citizen rated the resolution {rating}/5: {text}"),
            None => format!("Citizen rated the resolution {rating}/5"),
        };
        issue.citizen_rating = Some(rating);
        issue.citizen_feedback = feedback;

        self.commit(Commit {
            issue: IssueWrite::Replace(issue),
            updates: vec![NewUpdate::resolution(user_id.trim(), message)],
            at: now,
        })
    }

    /// Applies a generic partial update as one commit.
    ///
    /// Detail edits append one `comment` entry, assignment edits one
    /// `assignment` entry and a status change one `status_change` entry. A
    /// patch that changes nothing commits nothing.
    ///
    /// # Errors
    ///
    /// Returns an error, applying nothing, if the issue is unknown, the
    /// patch is empty, any field is invalid, or the status edge is illegal.
    pub fn patch(
        &mut self,
        issue_id: u64,
        user_id: &str,
        patch: IssuePatch,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        self.with_retry(|store| store.try_patch(issue_id, user_id, patch.clone(), now))
    }

    fn try_patch(
        &mut self,
        issue_id: u64,
        user_id: &str,
        patch: IssuePatch,
        now: DateTime<Utc>,
    ) -> Result<Committed> {
        require_text("user_id", user_id)?;
        if patch.is_empty() {
            return Err(Error::Validation("patch names no field".to_string()));
        }

        let original = self.get(issue_id)?;
        let mut issue = original.clone();
        let mut edited = Vec::new();

        if let Some(title) = patch.title {
            require_text("title", &title)?;
            let title = title.trim().to_string();
            if title != issue.title {
                issue.title = title;
                edited.push("title");
            }
        }
        if let Some(description) = patch.description {
            require_text("description", &description)?;
            let description = description.trim().to_string();
            if description != issue.description {
                issue.description = description;
                edited.push("description");
            }
        }
        if let Some(priority) = patch.priority {
            if priority != issue.priority {
                issue.priority = priority;
                edited.push("priority");
            }
        }
        if let Some(location) = patch.location {
            location.validate()?;
            if location != issue.location {
                issue.location = location;
                edited.push("location");
            }
        }
        if let Some(image_urls) = patch.image_urls {
            if image_urls.len() > self.max_images() {
                return Err(Error::Validation(format!(
                    "At most {} images may be attached, got {}",
                    self.max_images(),
                    image_urls.len()
                )));
            }
            if image_urls.iter().any(|url| url.trim().is_empty()) {
                return Err(Error::Validation(
                    "Image references cannot be empty".to_string(),
                ));
            }
            if image_urls != issue.image_urls {
                issue.image_urls = image_urls;
                edited.push("image_urls");
            }
        }

        let assignment = if patch.assigned_to.is_some() || patch.department_id.is_some() {
            self.apply_assignment(&mut issue, patch.assigned_to, patch.department_id)?
        } else {
            Vec::new()
        };

        let status_change = match patch.status {
            Some(target) => Some((apply_status(&mut issue, target, now)?, target)),
            None => None,
        };

        let actor = user_id.trim();
        let mut updates = Vec::new();
        if !edited.is_empty() {
            updates.push(NewUpdate::comment(
                actor,
                format!("Updated {}", edited.join(", ")),
            ));
        }
        if !assignment.is_empty() {
            updates.push(NewUpdate::assignment(actor, assignment.join("; ")));
        }
        if let Some((old, target)) = status_change {
            let message =
                non_blank(patch.message).unwrap_or_else(|| default_transition_message(target));
            updates.push(NewUpdate::status_change(actor, Some(old), target, message));
        }

        if updates.is_empty() {
            return Ok(Committed {
                issue: original,
                updates: Vec::new(),
            });
        }

        self.commit(Commit {
            issue: IssueWrite::Replace(issue),
            updates,
            at: now,
        })
    }

    /// Applies assignee/department edits, returning one message per change.
    fn apply_assignment(
        &self,
        issue: &mut Issue,
        assigned_to: Option<String>,
        department_id: Option<String>,
    ) -> Result<Vec<String>> {
        let mut messages = Vec::new();

        if let Some(department_id) = department_id {
            let department_id = non_blank(Some(department_id));
            if let Some(id) = &department_id {
                let department = self.catalog().department(id).ok_or_else(|| {
                    Error::Validation(format!("Unknown department: {id}"))
                })?;
                if issue.department_id.as_deref() != Some(id.as_str()) {
                    messages.push(format!("Routed to {}", department.name));
                }
            } else if issue.department_id.is_some() {
                messages.push("Department cleared".to_string());
            }
            issue.department_id = department_id;
        }

        if let Some(assigned_to) = assigned_to {
            let assigned_to = non_blank(Some(assigned_to));
            if assigned_to != issue.assigned_to {
                messages.push(match &assigned_to {
                    Some(assignee) => format!("Assigned to {assignee}"),
                    None => "Assignee cleared".to_string(),
                });
            }
            issue.assigned_to = assigned_to;
        }

        Ok(messages)
    }
}
