// Rust guideline compliant 2026-02-09

//! Implementation of the `civic create` command.

use super::open_service;
use crate::OutputFormatter;
use anyhow::{Context, Result};
use civic_app::{parse_priority, AppError};
use civic_core::{IssueDraft, Location};
use std::io::Read;
use std::path::Path;

/// Fields of a new report.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CreateArgs {
    /// One-line summary of the problem
    pub title: String,

    /// Detailed description
    #[arg(long)]
    pub description: Option<String>,

    /// Description from file ('-' for stdin)
    #[arg(long)]
    pub description_file: Option<String>,

    /// Category id (see `civic catalog`)
    #[arg(long)]
    pub category: String,

    /// Priority override (low, medium, high, urgent)
    #[arg(long)]
    pub priority: Option<String>,

    /// Reporting citizen id; omitted for anonymous reports
    #[arg(long)]
    pub reporter: Option<String>,

    /// Street address or landmark
    #[arg(long)]
    pub address: Option<String>,

    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Image reference (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
}

/// Reports a new issue and prints it.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory is not initialized
/// - The priority is unknown or both description sources are given
/// - The report fails validation
pub fn execute(data_dir: &Path, args: CreateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let description = read_description(args.description, args.description_file)?;
    let priority = args.priority.as_deref().map(parse_priority).transpose()?;

    let draft = IssueDraft {
        title: args.title,
        description,
        category_id: args.category,
        location: Location {
            address: args.address.unwrap_or_default(),
            lat: args.lat,
            lng: args.lng,
        },
        priority,
        reporter_id: args.reporter,
        image_urls: args.images,
    };

    let service = open_service(data_dir)?;
    let view = service.create(draft)?;
    let detail = service.get(view.issue.id, false)?;
    println!("{}", formatter.format_issue(&detail));
    Ok(())
}

fn read_description(inline: Option<String>, file: Option<String>) -> Result<String> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(AppError::InvalidInput(
            "Use either --description or --description-file, not both".to_string(),
        )
        .into()),
        (Some(text), None) => Ok(text),
        (None, Some(path)) if path == "-" => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read description file {path}")),
        (None, None) => Ok(String::new()),
    }
}
