// Rust guideline compliant 2026-02-09

//! Data directory discovery and store construction.

use crate::error::{AppError, Result};
use crate::service::IssueService;
use civic_core::{Catalog, Config, IssueStore, JsonlBackend, MemoryBackend, StorageKind};
use std::path::{Path, PathBuf};

/// Journal file name inside the data directory.
pub const JOURNAL_FILE: &str = "civic.jsonl";

/// Path metadata for a CivicConnect data directory.
#[derive(Debug, Clone)]
pub struct DataContext {
    data_dir: PathBuf,
    journal_path: PathBuf,
    config_path: PathBuf,
}

impl DataContext {
    /// Builds a context without touching the filesystem.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            journal_path: data_dir.join(JOURNAL_FILE),
            config_path: data_dir.join("config.toml"),
            data_dir,
        }
    }

    /// Opens an existing data directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotInitialized` if the directory is missing.
    pub fn discover(data_dir: &Path) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(AppError::NotInitialized {
                path: data_dir.to_path_buf(),
            });
        }
        Ok(Self::new(data_dir))
    }

    /// Creates the data directory and a default configuration file.
    ///
    /// An existing configuration is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or config file cannot be written.
    pub fn init(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let context = Self::new(data_dir);
        if !context.config_path.exists() {
            Config::default().save(data_dir)?;
        }
        Ok(context)
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the journal path.
    #[must_use]
    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or environment is invalid.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(&self.data_dir)?)
    }

    /// Loads the configured catalog, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn load_catalog(&self, config: &Config) -> Result<Catalog> {
        match config.catalog_path(&self.data_dir) {
            Some(path) => Ok(Catalog::load(&path)?),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Opens the store on the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or journal cannot be loaded.
    pub fn open_store(&self, config: &Config) -> Result<IssueStore> {
        let catalog = self.load_catalog(config)?;
        let store = match config.storage {
            StorageKind::Memory => IssueStore::new(Box::new(MemoryBackend::new()), catalog),
            StorageKind::Jsonl => {
                std::fs::create_dir_all(&self.data_dir)?;
                let backend = JsonlBackend::open(self.journal_path.clone())?;
                IssueStore::new(Box::new(backend), catalog)
            }
        };
        tracing::debug!(
            backend = store.backend_kind(),
            data_dir = %self.data_dir.display(),
            "Opened issue store"
        );
        Ok(store.with_max_images(config.max_images))
    }

    /// Opens the store and wraps it in a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open_service(&self, config: &Config) -> Result<IssueService> {
        Ok(IssueService::new(self.open_store(config)?))
    }
}
