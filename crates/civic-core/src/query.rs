// Rust guideline compliant 2026-02-06

//! Filter/query engine for issues.
//!
//! Criteria are AND-combined; an absent criterion, or the `"all"`
//! sentinel, places no constraint on its field. Results are ordered by
//! `created_at` descending with ties broken by descending `id`, then
//! paginated.

use crate::{Issue, Priority, Status};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Sentinel accepted in place of any filter value to mean "no constraint".
pub const ALL: &str = "all";

/// Above this many issues filtering runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 1_000;

/// Filter criteria for listing issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Filter by current status.
    pub status: Option<Status>,
    /// Filter by category id.
    pub category_id: Option<String>,
    /// Filter by department id.
    pub department_id: Option<String>,
    /// Filter by reporter id.
    pub reporter_id: Option<String>,
    /// Filter by priority.
    pub priority: Option<Priority>,
    /// Filter by assignee.
    pub assigned_to: Option<String>,
}

impl IssueFilter {
    /// Returns true if the issue satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(status) = self.status {
            if issue.status != status {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if issue.priority != priority {
                return false;
            }
        }

        if !matches_text(self.category_id.as_deref(), Some(issue.category_id.as_str())) {
            return false;
        }

        if !matches_text(
            self.department_id.as_deref(),
            issue.department_id.as_deref(),
        ) {
            return false;
        }

        if !matches_text(self.reporter_id.as_deref(), issue.reporter_id.as_deref()) {
            return false;
        }

        matches_text(self.assigned_to.as_deref(), issue.assigned_to.as_deref())
    }
}

fn matches_text(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(value) if is_unconstrained(value) => true,
        Some(value) => actual == Some(value),
    }
}

/// Returns true for values that mean "no constraint": blank or `"all"`.
#[must_use]
pub fn is_unconstrained(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL)
}

/// Maps a raw filter value to a constraint, treating blank and `"all"` as
/// absent.
#[must_use]
pub fn constraint(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !is_unconstrained(v))
        .map(|v| v.trim().to_string())
}

/// Offset/limit pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results, unlimited when `None`.
    pub limit: Option<usize>,
    /// Number of leading matches to skip.
    pub offset: usize,
}

impl Pagination {
    /// Creates a pagination window.
    #[must_use]
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }
}

/// Recency ordering: newest first, later insertion first on ties.
#[must_use]
pub fn recency_order(a: &Issue, b: &Issue) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Filters and orders issues without paginating.
///
/// # Arguments
///
/// * `issues` - Issues to evaluate
/// * `filter` - Filter criteria
///
/// # Returns
///
/// All matching issues in recency order.
pub fn select(issues: Vec<Issue>, filter: &IssueFilter) -> Vec<Issue> {
    let mut matched: Vec<Issue> = if issues.len() >= PARALLEL_THRESHOLD {
        issues
            .into_par_iter()
            .filter(|issue| filter.matches(issue))
            .collect()
    } else {
        issues
            .into_iter()
            .filter(|issue| filter.matches(issue))
            .collect()
    };

    matched.sort_by(recency_order);
    matched
}

/// Applies an offset/limit window to an ordered sequence.
///
/// An offset past the end yields an empty sequence.
pub fn paginate<T>(items: Vec<T>, page: Pagination) -> Vec<T> {
    let iter = items.into_iter().skip(page.offset);
    match page.limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

/// Filters, orders and paginates issues.
///
/// # Arguments
///
/// * `issues` - Issues to evaluate
/// * `filter` - Filter criteria
/// * `page` - Pagination window
///
/// # Returns
///
/// The requested window of matching issues.
pub fn apply(issues: Vec<Issue>, filter: &IssueFilter, page: Pagination) -> Vec<Issue> {
    paginate(select(issues, filter), page)
}
