// Rust guideline compliant 2026-02-09

//! HTTP server runtime for CivicConnect.

use crate::api::{router, AppState};
use civic_app::{AppError, DataContext};
use civic_core::{Config, LogFormat};
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Runtime options for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Data directory holding the config and journal.
    pub data_dir: PathBuf,
    /// Listen address overriding the configured one.
    pub addr: Option<String>,
    /// Optional log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".civic"),
            addr: None,
            log_file: None,
        }
    }
}

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO errors during runtime setup or serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The store or configuration could not be opened.
    #[error(transparent)]
    App(#[from] AppError),
    /// Invalid listen address.
    #[error("Invalid listen address: {0}")]
    InvalidAddr(String),
}

/// Runs the HTTP server until interrupted.
///
/// # Arguments
///
/// * `options` - Server runtime options
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or store cannot be loaded
/// - The listen address is invalid or cannot be bound
pub fn run(options: ServeOptions) -> Result<(), ServerError> {
    let context = DataContext::new(options.data_dir.clone());
    let config = context.load_config()?;
    let _guard = init_tracing(&config, options.log_file.as_ref())?;

    let addr = listen_addr(&options, &config)?;
    let service = context.open_service(&config)?;
    let state = AppState::new(service, config.event_buffer);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            storage = state.service.backend_kind(),
            version = env!("CARGO_PKG_VERSION"),
            "CivicConnect API listening"
        );
        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok::<(), ServerError>(())
    })
}

fn listen_addr(options: &ServeOptions, config: &Config) -> Result<SocketAddr, ServerError> {
    match &options.addr {
        Some(addr) => addr
            .parse()
            .map_err(|_| ServerError::InvalidAddr(addr.clone())),
        None => Ok(config.socket_addr().map_err(AppError::from)?),
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns the
/// appender guard when logging to a file; dropping it flushes the file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_tracing(
    config: &Config,
    log_file: Option<&PathBuf>,
) -> Result<Option<WorkerGuard>, ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));

    let (writer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer);
    let _ = match config.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
    };

    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
