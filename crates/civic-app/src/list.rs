// Rust guideline compliant 2026-02-09

//! Input parsing and list options for CivicConnect.
//!
//! Raw values arrive as strings from query parameters and CLI flags. The
//! sentinel `"all"` (any case) and blank values mean "no constraint".

use crate::error::{AppError, Result};
use civic_core::query::{constraint, is_unconstrained};
use civic_core::{IssueFilter, Pagination, Priority, Status};
use serde::Deserialize;

/// Raw list options, as received from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListOptions {
    /// Status name or `all`.
    #[serde(default)]
    pub status: Option<String>,
    /// Category id or `all`.
    #[serde(default, alias = "category_id")]
    pub category: Option<String>,
    /// Department id or `all`.
    #[serde(default, alias = "department_id")]
    pub department: Option<String>,
    /// Reporter id or `all`.
    #[serde(default, alias = "reporter_id")]
    pub reporter: Option<String>,
    /// Priority name or `all`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee or `all`.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of leading matches to skip.
    #[serde(default)]
    pub offset: Option<usize>,
}

impl ListOptions {
    /// Converts raw options into a typed filter and pagination window.
    ///
    /// # Errors
    ///
    /// Returns an error if the status or priority is unknown.
    pub fn to_query(&self) -> Result<(IssueFilter, Pagination)> {
        let status = match self.status.as_deref() {
            Some(value) if !is_unconstrained(value) => Some(parse_status(value)?),
            _ => None,
        };
        let priority = match self.priority.as_deref() {
            Some(value) if !is_unconstrained(value) => Some(parse_priority(value)?),
            _ => None,
        };

        let filter = IssueFilter {
            status,
            category_id: constraint(self.category.clone()),
            department_id: constraint(self.department.clone()),
            reporter_id: constraint(self.reporter.clone()),
            priority,
            assigned_to: constraint(self.assigned_to.clone()),
        };
        Ok((
            filter,
            Pagination::new(self.limit, self.offset.unwrap_or(0)),
        ))
    }
}

/// Parses a status string into a `Status` value.
///
/// # Arguments
///
/// * `value` - Status string
///
/// # Errors
///
/// Returns an error if the status is invalid.
pub fn parse_status(value: &str) -> Result<Status> {
    match value.trim().to_lowercase().as_str() {
        "reported" => Ok(Status::Reported),
        "acknowledged" => Ok(Status::Acknowledged),
        "in_progress" | "in-progress" => Ok(Status::InProgress),
        "resolved" => Ok(Status::Resolved),
        "closed" => Ok(Status::Closed),
        "rejected" => Ok(Status::Rejected),
        _ => Err(AppError::InvalidInput(format!("Invalid status: {}", value))),
    }
}

/// Parses a priority string into a `Priority` value.
///
/// # Errors
///
/// Returns an error if the priority is invalid.
pub fn parse_priority(value: &str) -> Result<Priority> {
    match value.trim().to_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        "urgent" => Ok(Priority::Urgent),
        _ => Err(AppError::InvalidInput(format!(
            "Invalid priority: {}",
            value
        ))),
    }
}

/// Parses an issue identifier.
///
/// Unparseable identifiers cannot name an issue, so they are reported as
/// not found rather than as bad input.
///
/// # Errors
///
/// Returns a not-found error if `value` is not a positive integer.
pub fn parse_issue_id(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::Core(civic_core::Error::NotFound(value.to_string())))
}
