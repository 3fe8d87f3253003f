// Rust guideline compliant 2026-02-09

//! CivicConnect CLI Application
//!
//! Command-line interface for reporting and managing civic issues.

use civic_app::{AppError, ErrorCode, ErrorEnvelope};
use civic_cli::commands::{self, create::CreateArgs, list::ListArgs, update::UpdateArgs};
use civic_cli::{create_formatter, should_use_color};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "civic",
    version,
    about = "CivicConnect: municipal issue reporting and tracking",
    long_about = "CivicConnect records citizen reports of municipal problems, routes them to departments, and tracks each report through its lifecycle with a full audit trail.",
    after_help = "Examples:\n  civic init\n  civic create \"Pothole on Main\" --category pothole --description \"Deep hole\" --address \"1 Main St\"\n  civic list --status reported --department public-works\n  civic transition 1 acknowledged --user crew-7\n  civic comment 1 \"Crew scheduled\" --private\n  civic serve --addr 0.0.0.0:8080\n"
)]
struct Cli {
    /// Data directory holding the config and journal
    #[arg(long, global = true, default_value = ".civic", env = "CIVIC_DATA_DIR")]
    data_dir: PathBuf,

    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a data directory
    Init,

    /// Run the HTTP API
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        addr: Option<String>,

        /// Write logs to this file instead of stderr
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Report a new issue
    Create(CreateArgs),

    /// List issues, newest first
    List(ListArgs),

    /// Show an issue and its history
    Show {
        /// Issue id
        id: String,

        /// Hide internal audit entries
        #[arg(long)]
        public_only: bool,
    },

    /// Move an issue to a new status
    Transition {
        /// Issue id
        id: String,

        /// Target status
        status: String,

        /// Acting staff member
        #[arg(long)]
        user: Option<String>,

        /// Note for the audit entry
        #[arg(long)]
        message: Option<String>,
    },

    /// Comment on an issue
    Comment {
        /// Issue id
        id: String,

        /// Comment text
        message: String,

        /// Acting user
        #[arg(long)]
        user: Option<String>,

        /// Hide the comment from citizens
        #[arg(long)]
        private: bool,
    },

    /// Assign an issue to staff and/or a department
    Assign {
        /// Issue id
        id: String,

        /// Staff member to assign (empty to clear)
        #[arg(long = "to")]
        assigned_to: Option<String>,

        /// Department id to route to (empty to clear)
        #[arg(long)]
        department: Option<String>,

        /// Acting staff member
        #[arg(long)]
        user: Option<String>,
    },

    /// Record citizen feedback on a resolved issue
    Feedback {
        /// Issue id
        id: String,

        /// Rating from 1 to 5
        rating: u8,

        /// Free-text feedback
        #[arg(long)]
        feedback: Option<String>,

        /// Citizen giving the feedback
        #[arg(long)]
        user: Option<String>,
    },

    /// Update several fields of an issue at once
    Update(UpdateArgs),

    /// Show the audit trail of an issue
    History {
        /// Issue id
        id: String,

        /// Hide internal audit entries
        #[arg(long)]
        public_only: bool,
    },

    /// Show dashboard statistics
    Stats,

    /// List departments and categories
    Catalog,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let use_color = !cli.no_color && should_use_color();
    let format = match cli.format {
        Some(OutputFormat::Json) => "json",
        Some(OutputFormat::Table) => "table",
        Some(OutputFormat::Plain) => "plain",
        None if cli.json => "json",
        None => "table",
    };
    let boxed = create_formatter(format, use_color);
    let formatter = boxed.as_ref();
    let data_dir = cli.data_dir.as_path();

    let result = match cli.command {
        Some(Commands::Init) => commands::init::execute(data_dir, formatter),
        Some(Commands::Serve { addr, log_file }) => {
            commands::serve::execute(data_dir, addr, log_file)
        }
        Some(Commands::Create(args)) => commands::create::execute(data_dir, args, formatter),
        Some(Commands::List(args)) => commands::list::execute(data_dir, args, formatter),
        Some(Commands::Show { id, public_only }) => {
            commands::show::execute(data_dir, &id, public_only, formatter)
        }
        Some(Commands::Transition {
            id,
            status,
            user,
            message,
        }) => commands::transition::execute(data_dir, &id, &status, user, message, formatter),
        Some(Commands::Comment {
            id,
            message,
            user,
            private,
        }) => commands::comment::execute(data_dir, &id, message, user, private, formatter),
        Some(Commands::Assign {
            id,
            assigned_to,
            department,
            user,
        }) => commands::assign::execute(data_dir, &id, assigned_to, department, user, formatter),
        Some(Commands::Feedback {
            id,
            rating,
            feedback,
            user,
        }) => commands::feedback::execute(data_dir, &id, rating, feedback, user, formatter),
        Some(Commands::Update(args)) => commands::update::execute(data_dir, args, formatter),
        Some(Commands::History { id, public_only }) => {
            commands::history::execute(data_dir, &id, public_only, formatter)
        }
        Some(Commands::Stats) => commands::stats::execute(data_dir, formatter),
        Some(Commands::Catalog) => commands::catalog::execute(data_dir, formatter),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let envelope = match err.downcast_ref::<AppError>() {
                Some(app) => ErrorEnvelope::from_error(app),
                None => ErrorEnvelope {
                    code: ErrorCode::Unknown,
                    message: format!("{err:#}"),
                    details: None,
                },
            };
            if format == "json" {
                println!("{}", formatter.format_error(&envelope));
            } else {
                eprintln!("{}", formatter.format_error(&envelope));
            }
            ExitCode::FAILURE
        }
    }
}
