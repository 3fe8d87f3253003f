// Rust guideline compliant 2026-02-06

//! Read projections: denormalized, display-ready issue views.
//!
//! Projections never fail on dangling references; they fall back to the
//! sentinel labels below.

use crate::{Catalog, Issue, IssueUpdate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Label for issues without a reporter.
pub const ANONYMOUS_LABEL: &str = "Anonymous";
/// Label for issues without a known department.
pub const UNASSIGNED_LABEL: &str = "Unassigned";
/// Label for issues whose category is not in the catalog.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// An issue joined with its category, department and reporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueView {
    /// The issue itself.
    #[serde(flatten)]
    pub issue: Issue,
    /// Category display name.
    pub category_name: String,
    /// Department display name.
    pub department_name: String,
    /// Reporter display name.
    pub reporter_name: String,
    /// Category SLA in days, if the category is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_days: Option<u32>,
    /// Past the estimated resolution date without reaching an end state.
    pub is_overdue: bool,
}

/// An issue view together with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueDetail {
    /// The denormalized issue.
    #[serde(flatten)]
    pub view: IssueView,
    /// Audit entries, oldest first.
    pub updates: Vec<IssueUpdate>,
}

/// Builds the view of a single issue.
///
/// # Arguments
///
/// * `issue` - The issue to project
/// * `catalog` - Reference data to join against
/// * `now` - Reference time for the overdue flag
#[must_use]
pub fn project(issue: Issue, catalog: &Catalog, now: DateTime<Utc>) -> IssueView {
    let category = catalog.category(&issue.category_id);
    let category_name = category
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
    let department_name = issue
        .department_id
        .as_deref()
        .and_then(|id| catalog.department(id))
        .map(|d| d.name.clone())
        .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());
    let reporter_name = match issue.reporter_id.as_deref() {
        Some(id) => catalog
            .citizen(id)
            .map(|c| c.full_name())
            .unwrap_or_else(|| id.to_string()),
        None => ANONYMOUS_LABEL.to_string(),
    };
    let is_overdue = is_overdue(&issue, now);

    IssueView {
        sla_days: category.map(|c| c.estimated_resolution_days),
        issue,
        category_name,
        department_name,
        reporter_name,
        is_overdue,
    }
}

/// Builds views for a sequence of issues, preserving order.
#[must_use]
pub fn project_all(issues: Vec<Issue>, catalog: &Catalog, now: DateTime<Utc>) -> Vec<IssueView> {
    issues
        .into_iter()
        .map(|issue| project(issue, catalog, now))
        .collect()
}

/// Builds the detail view of an issue.
///
/// # Arguments
///
/// * `issue` - The issue to project
/// * `updates` - Its audit trail
/// * `public_only` - Drop entries not visible to citizens
/// * `catalog` - Reference data to join against
/// * `now` - Reference time for the overdue flag
#[must_use]
pub fn detail(
    issue: Issue,
    updates: Vec<IssueUpdate>,
    public_only: bool,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> IssueDetail {
    let updates = if public_only {
        updates.into_iter().filter(|u| u.is_public).collect()
    } else {
        updates
    };
    IssueDetail {
        view: project(issue, catalog, now),
        updates,
    }
}

fn is_overdue(issue: &Issue, now: DateTime<Utc>) -> bool {
    !issue.status.is_terminal()
        && issue
            .estimated_resolution_date
            .map(|due| now > due)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Citizen, Role};
    use crate::{Location, Priority, Status};
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn sample_issue() -> Issue {
        Issue {
            id: 1,
            title: "Pothole on Elm".to_string(),
            description: "Deep".to_string(),
            category_id: "pothole".to_string(),
            status: Status::Reported,
            priority: Priority::Medium,
            location: Location::default(),
            reporter_id: None,
            assigned_to: None,
            department_id: Some("public-works".to_string()),
            image_urls: Vec::new(),
            created_at: at(1),
            updated_at: at(1),
            estimated_resolution_date: Some(at(1) + Duration::days(7)),
            actual_resolution_date: None,
            citizen_rating: None,
            citizen_feedback: None,
        }
    }

    #[test]
    fn test_project_joins_reference_data() {
        let view = project(sample_issue(), &Catalog::builtin(), at(2));
        assert_eq!(view.category_name, "Pothole");
        assert_eq!(view.department_name, "Public Works");
        assert_eq!(view.reporter_name, ANONYMOUS_LABEL);
        assert_eq!(view.sla_days, Some(7));
        assert!(!view.is_overdue);
    }

    #[test]
    fn test_project_degrades_missing_references() {
        let mut issue = sample_issue();
        issue.category_id = "volcano".to_string();
        issue.department_id = Some("ministry-of-magic".to_string());
        issue.reporter_id = Some("c-404".to_string());

        let view = project(issue, &Catalog::builtin(), at(2));
        assert_eq!(view.category_name, UNCATEGORIZED_LABEL);
        assert_eq!(view.department_name, UNASSIGNED_LABEL);
        assert_eq!(view.reporter_name, "c-404");
        assert_eq!(view.sla_days, None);
    }

    #[test]
    fn test_project_resolves_known_reporter() {
        let mut catalog = Catalog::builtin();
        catalog.citizens.push(Citizen {
            id: "c-1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            role: Role::Citizen,
        });
        let mut issue = sample_issue();
        issue.reporter_id = Some("c-1".to_string());

        assert_eq!(project(issue, &catalog, at(2)).reporter_name, "John Doe");
    }

    #[test]
    fn test_overdue_only_for_open_work() {
        let late = at(20);
        assert!(project(sample_issue(), &Catalog::builtin(), late).is_overdue);

        let mut in_progress = sample_issue();
        in_progress.status = Status::InProgress;
        assert!(project(in_progress, &Catalog::builtin(), late).is_overdue);

        for status in [Status::Resolved, Status::Closed, Status::Rejected] {
            let mut finished = sample_issue();
            finished.status = status;
            assert!(
                !project(finished, &Catalog::builtin(), late).is_overdue,
                "{status} should never be overdue"
            );
        }
    }

    #[test]
    fn test_view_serializes_flat() {
        let view = project(sample_issue(), &Catalog::builtin(), at(2));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "reported");
        assert_eq!(json["category_name"], "Pothole");
    }
}
