// Rust guideline compliant 2026-02-09

//! Output formatting for the CivicConnect CLI.
//!
//! Formatters render issues, audit trails, statistics and reference data
//! as JSON envelopes, tables, or plain text.

use chrono::{DateTime, Utc};
use civic_app::{ErrorEnvelope, SuccessEnvelope};
use civic_core::{Department, IssueCategory, IssueDetail, IssueUpdate, IssueView, Stats, Status};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for rendering command results.
pub trait OutputFormatter {
    /// Formats a single issue with its audit trail.
    fn format_issue(&self, detail: &IssueDetail) -> String;

    /// Formats an issue list.
    ///
    /// # Arguments
    /// * `issues` - The page of issues to show
    /// * `total` - Number of matches before pagination
    fn format_list(&self, issues: &[IssueView], total: usize) -> String;

    /// Formats audit entries.
    fn format_updates(&self, updates: &[IssueUpdate]) -> String;

    /// Formats dashboard statistics.
    fn format_stats(&self, stats: &Stats) -> String;

    /// Formats the active departments and categories.
    fn format_catalog(&self, departments: &[Department], categories: &[IssueCategory]) -> String;

    /// Formats a confirmation message with its machine-readable payload.
    fn format_notice(&self, message: &str, payload: &Value) -> String;

    /// Formats an error for display.
    fn format_error(&self, error: &ErrorEnvelope) -> String;
}

/// Serializes a payload inside a success envelope.
pub fn envelope<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(&SuccessEnvelope::new(result)).unwrap_or_else(|err| {
        json!({ "code": "json_error", "message": err.to_string() }).to_string()
    })
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn optional(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn average(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// JSON output formatter.
///
/// Wraps every payload in the standard success envelope.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_issue(&self, detail: &IssueDetail) -> String {
        envelope(detail)
    }

    fn format_list(&self, issues: &[IssueView], total: usize) -> String {
        envelope(&json!({
            "issues": issues,
            "total": total,
        }))
    }

    fn format_updates(&self, updates: &[IssueUpdate]) -> String {
        envelope(&updates)
    }

    fn format_stats(&self, stats: &Stats) -> String {
        envelope(stats)
    }

    fn format_catalog(&self, departments: &[Department], categories: &[IssueCategory]) -> String {
        envelope(&json!({
            "departments": departments,
            "categories": categories,
        }))
    }

    fn format_notice(&self, _message: &str, payload: &Value) -> String {
        envelope(payload)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        serde_json::to_string_pretty(error)
            .unwrap_or_else(|_| json!({ "message": error.message }).to_string())
    }
}

/// Table output formatter.
///
/// Renders human-readable tables, optionally with colored status labels.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{text}");
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    fn status(&self, status: Status) -> String {
        let color = match status {
            Status::Reported | Status::Acknowledged => Color::Yellow,
            Status::InProgress => Color::Cyan,
            Status::Resolved | Status::Closed => Color::Green,
            Status::Rejected => Color::Red,
        };
        self.paint(status.as_str(), color)
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

fn updates_table(updates: &[IssueUpdate]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "When", "Type", "By", "Change", "Public", "Message"]);
    for update in updates {
        let change = match (update.old_status, update.new_status) {
            (Some(old), Some(new)) => format!("{old} -> {new}"),
            (None, Some(new)) => format!("-> {new}"),
            _ => String::new(),
        };
        builder.push_record([
            update.id.to_string(),
            timestamp(&update.created_at),
            update.update_type.as_str().to_string(),
            update.user_id.clone(),
            change,
            String::from(if update.is_public { "yes" } else { "no" }),
            update.message.clone(),
        ]);
    }
    render(builder)
}

impl OutputFormatter for TableFormatter {
    fn format_issue(&self, detail: &IssueDetail) -> String {
        let view = &detail.view;
        let issue = &view.issue;
        let mut output = String::new();

        output.push_str(&format!("Issue #{}: {}\n", issue.id, issue.title));
        output.push_str(&format!("Status:      {}\n", self.status(issue.status)));
        output.push_str(&format!("Priority:    {}\n", issue.priority));
        output.push_str(&format!("Category:    {}\n", view.category_name));
        output.push_str(&format!("Department:  {}\n", view.department_name));
        output.push_str(&format!("Reporter:    {}\n", view.reporter_name));
        output.push_str(&format!(
            "Assigned:    {}\n",
            optional(issue.assigned_to.as_deref())
        ));
        if !issue.location.address.is_empty() {
            output.push_str(&format!("Location:    {}\n", issue.location.address));
        }
        output.push_str(&format!("Reported:    {}\n", timestamp(&issue.created_at)));
        if let Some(due) = &issue.estimated_resolution_date {
            let overdue = if view.is_overdue {
                format!(" {}", self.paint("(overdue)", Color::Red))
            } else {
                String::new()
            };
            output.push_str(&format!("Due:         {}{overdue}\n", timestamp(due)));
        }
        if let Some(resolved) = &issue.actual_resolution_date {
            output.push_str(&format!("Resolved:    {}\n", timestamp(resolved)));
        }
        if let Some(rating) = issue.citizen_rating {
            output.push_str(&format!("Rating:      {rating}/5\n"));
        }
        if let Some(feedback) = &issue.citizen_feedback {
            output.push_str(&format!("Feedback:    {feedback}\n"));
        }
        output.push_str(&format!("\n{}\n", issue.description));

        if !detail.updates.is_empty() {
            output.push_str("\nHistory:\n");
            output.push_str(&updates_table(&detail.updates));
        }
        output
    }

    fn format_list(&self, issues: &[IssueView], total: usize) -> String {
        if issues.is_empty() {
            return "No issues found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Status", "Priority", "Category", "Department", "Title"]);
        for view in issues {
            builder.push_record([
                view.issue.id.to_string(),
                view.issue.status.as_str().to_string(),
                view.issue.priority.to_string(),
                view.category_name.clone(),
                view.department_name.clone(),
                view.issue.title.clone(),
            ]);
        }

        let mut output = render(builder);
        if total > issues.len() {
            output.push_str(&format!("\nShowing {} of {total} issues", issues.len()));
        }
        output
    }

    fn format_updates(&self, updates: &[IssueUpdate]) -> String {
        if updates.is_empty() {
            return "No updates.".to_string();
        }
        updates_table(updates)
    }

    fn format_stats(&self, stats: &Stats) -> String {
        let mut output = String::new();
        output.push_str(&format!("Total issues:        {}\n", stats.total_issues));
        output.push_str(&format!("Open:                {}\n", stats.open_issues));
        output.push_str(&format!("In progress:         {}\n", stats.in_progress_issues));
        output.push_str(&format!("Resolved:            {}\n", stats.resolved_issues));
        output.push_str(&format!(
            "Avg resolution days: {}\n",
            average(stats.average_resolution_days)
        ));
        output.push_str(&format!(
            "Satisfaction:        {}\n",
            average(stats.citizen_satisfaction)
        ));

        if !stats.departments.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Department", "Total", "Open", "In progress", "Resolved"]);
            for department in &stats.departments {
                builder.push_record([
                    department.name.clone(),
                    department.total.to_string(),
                    department.open.to_string(),
                    department.in_progress.to_string(),
                    department.resolved.to_string(),
                ]);
            }
            output.push('\n');
            output.push_str(&render(builder));
            output.push('\n');
        }

        if !stats.monthly_trends.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Month", "Reported", "Resolved"]);
            for trend in &stats.monthly_trends {
                builder.push_record([
                    trend.month.clone(),
                    trend.reported.to_string(),
                    trend.resolved.to_string(),
                ]);
            }
            output.push('\n');
            output.push_str(&render(builder));
        }
        output
    }

    fn format_catalog(&self, departments: &[Department], categories: &[IssueCategory]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Department", "Name", "Contact"]);
        for department in departments {
            builder.push_record([
                department.id.clone(),
                department.name.clone(),
                optional(department.contact_email.as_deref()).to_string(),
            ]);
        }
        let mut output = render(builder);

        let mut builder = Builder::default();
        builder.push_record(["Category", "Name", "Department", "Priority", "SLA days"]);
        for category in categories {
            builder.push_record([
                category.id.clone(),
                category.name.clone(),
                category.department_id.clone(),
                category.priority.to_string(),
                category.estimated_resolution_days.to_string(),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&render(builder));
        output
    }

    fn format_notice(&self, message: &str, _payload: &Value) -> String {
        format!("{} {message}", self.paint("✓", Color::Green))
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!("{} {}", self.paint("Error:", Color::Red), error.message)
    }
}

/// Plain text output formatter.
///
/// One tab-separated record per line, for scripts.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_issue(&self, detail: &IssueDetail) -> String {
        let issue = &detail.view.issue;
        let mut output = format!(
            "{}\t{}\t{}\t{}\t{}\n",
            issue.id,
            issue.status,
            issue.priority,
            issue.category_id,
            issue.title
        );
        output.push_str(&self.format_updates(&detail.updates));
        output
    }

    fn format_list(&self, issues: &[IssueView], _total: usize) -> String {
        let mut output = String::new();
        for view in issues {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                view.issue.id, view.issue.status, view.issue.priority, view.issue.title
            ));
        }
        output
    }

    fn format_updates(&self, updates: &[IssueUpdate]) -> String {
        let mut output = String::new();
        for update in updates {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                update.id,
                update.update_type.as_str(),
                update.user_id,
                update.message
            ));
        }
        output
    }

    fn format_stats(&self, stats: &Stats) -> String {
        let mut output = format!("total\t{}\n", stats.total_issues);
        for (status, count) in &stats.by_status {
            output.push_str(&format!("{status}\t{count}\n"));
        }
        output
    }

    fn format_catalog(&self, departments: &[Department], categories: &[IssueCategory]) -> String {
        let mut output = String::new();
        for department in departments {
            output.push_str(&format!("department\t{}\t{}\n", department.id, department.name));
        }
        for category in categories {
            output.push_str(&format!(
                "category\t{}\t{}\t{}\n",
                category.id, category.department_id, category.estimated_resolution_days
            ));
        }
        output
    }

    fn format_notice(&self, message: &str, _payload: &Value) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!("Error: {}", error.message)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format ("json", "table", or "plain")
/// * `use_color` - Whether to use colored output (ignored outside tables)
pub fn create_formatter(format: &str, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "plain" => Box::new(PlainFormatter),
        _ => Box::new(TableFormatter::new(use_color)),
    }
}
