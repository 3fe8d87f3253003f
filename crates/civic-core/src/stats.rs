// Rust guideline compliant 2026-02-06

//! Aggregate statistics for dashboards.

use crate::projection::{UNASSIGNED_LABEL, UNCATEGORIZED_LABEL};
use crate::{Catalog, Issue, Status};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    /// Department id, `None` for unrouted issues.
    pub department_id: Option<String>,
    /// Display name.
    pub name: String,
    /// All issues routed here.
    pub total: usize,
    /// Resolved or closed.
    pub resolved: usize,
    /// In progress.
    pub in_progress: usize,
    /// Reported or acknowledged.
    pub open: usize,
}

/// Counts for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// Category id.
    pub category_id: String,
    /// Display name.
    pub name: String,
    /// All issues in the category.
    pub count: usize,
    /// Resolved or closed.
    pub resolved: usize,
}

/// Reported and resolved counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Issues created in the month.
    pub reported: usize,
    /// Issues resolved in the month.
    pub resolved: usize,
}

/// Dashboard statistics over the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    /// Number of issues.
    pub total_issues: usize,
    /// Issue count per status; every status is present.
    pub by_status: BTreeMap<Status, usize>,
    /// Reported or acknowledged.
    pub open_issues: usize,
    /// In progress.
    pub in_progress_issues: usize,
    /// Resolved or closed.
    pub resolved_issues: usize,
    /// Mean days from creation to resolution.
    pub average_resolution_days: Option<f64>,
    /// Mean citizen rating.
    pub citizen_satisfaction: Option<f64>,
    /// Per-department counts sorted by name.
    pub departments: Vec<DepartmentStats>,
    /// Per-category counts sorted by count, descending.
    pub categories: Vec<CategoryStats>,
    /// Per-month counts in chronological order.
    pub monthly_trends: Vec<MonthlyTrend>,
}

fn is_open(status: Status) -> bool {
    matches!(status, Status::Reported | Status::Acknowledged)
}

fn is_done(status: Status) -> bool {
    matches!(status, Status::Resolved | Status::Closed)
}

/// Computes dashboard statistics.
///
/// # Arguments
///
/// * `issues` - Issues to aggregate
/// * `catalog` - Reference data for display names
#[must_use]
pub fn compute(issues: &[Issue], catalog: &Catalog) -> Stats {
    let mut by_status: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
    let mut departments: BTreeMap<Option<String>, DepartmentStats> = BTreeMap::new();
    let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
    let mut months: BTreeMap<String, MonthlyTrend> = BTreeMap::new();
    let mut resolution_days = Vec::new();
    let mut ratings = Vec::new();

    for issue in issues {
        *by_status.entry(issue.status).or_insert(0) += 1;

        let department = departments
            .entry(issue.department_id.clone())
            .or_insert_with(|| DepartmentStats {
                department_id: issue.department_id.clone(),
                name: issue
                    .department_id
                    .as_deref()
                    .and_then(|id| catalog.department(id))
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| UNASSIGNED_LABEL.to_string()),
                total: 0,
                resolved: 0,
                in_progress: 0,
                open: 0,
            });
        department.total += 1;
        if is_done(issue.status) {
            department.resolved += 1;
        } else if issue.status == Status::InProgress {
            department.in_progress += 1;
        } else if is_open(issue.status) {
            department.open += 1;
        }

        let category = categories
            .entry(issue.category_id.clone())
            .or_insert_with(|| CategoryStats {
                category_id: issue.category_id.clone(),
                name: catalog
                    .category(&issue.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
                count: 0,
                resolved: 0,
            });
        category.count += 1;
        if is_done(issue.status) {
            category.resolved += 1;
        }

        month_entry(&mut months, issue.created_at.format("%Y-%m").to_string()).reported += 1;

        if let Some(resolved_at) = issue.actual_resolution_date {
            month_entry(&mut months, resolved_at.format("%Y-%m").to_string()).resolved += 1;
            let seconds = (resolved_at - issue.created_at).num_seconds().max(0);
            resolution_days.push(seconds as f64 / 86_400.0);
        }

        if let Some(rating) = issue.citizen_rating {
            ratings.push(f64::from(rating));
        }
    }

    let mut departments: Vec<DepartmentStats> = departments.into_values().collect();
    departments.sort_by(|a, b| a.name.cmp(&b.name));

    let mut categories: Vec<CategoryStats> = categories.into_values().collect();
    categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let count = |pred: fn(Status) -> bool| {
        by_status
            .iter()
            .filter(|(status, _)| pred(**status))
            .map(|(_, n)| *n)
            .sum::<usize>()
    };

    Stats {
        total_issues: issues.len(),
        open_issues: count(is_open),
        in_progress_issues: by_status.get(&Status::InProgress).copied().unwrap_or(0),
        resolved_issues: count(is_done),
        by_status,
        average_resolution_days: mean(&resolution_days),
        citizen_satisfaction: mean(&ratings),
        departments,
        categories,
        monthly_trends: months.into_values().collect(),
    }
}

fn month_entry(months: &mut BTreeMap<String, MonthlyTrend>, month: String) -> &mut MonthlyTrend {
    months.entry(month.clone()).or_insert(MonthlyTrend {
        month,
        reported: 0,
        resolved: 0,
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
