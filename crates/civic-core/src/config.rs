// Rust guideline compliant 2026-02-06

//! Configuration management for CivicConnect.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Which storage backend holds the issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Ephemeral, lost on exit.
    Memory,
    /// JSONL journal in the data directory.
    #[default]
    Jsonl,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Configuration for the issue service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend.
    #[serde(default)]
    pub storage: StorageKind,

    /// Socket address of the HTTP API.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Default log level (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum image references per issue.
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Capacity of the event broadcast buffer.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Catalog file replacing the built-in reference data, relative to the
    /// data directory unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
}

fn default_http_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_images() -> usize {
    3
}

fn default_event_buffer() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            http_addr: default_http_addr(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            max_images: default_max_images(),
            event_buffer: default_event_buffer(),
            catalog_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<data_dir>/config.toml`
    /// 3. Environment variables with `CIVIC_` prefix
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| crate::Error::Config(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CIVIC_STORAGE` - Storage backend (memory/jsonl)
    /// - `CIVIC_HTTP_ADDR` - HTTP socket address
    /// - `CIVIC_LOG_LEVEL` - Default log level
    /// - `CIVIC_LOG_FORMAT` - Log format (pretty/json)
    /// - `CIVIC_MAX_IMAGES` - Maximum image references per issue
    /// - `CIVIC_EVENT_BUFFER` - Event broadcast buffer capacity
    /// - `CIVIC_CATALOG_FILE` - Catalog file path
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CIVIC_STORAGE") {
            self.storage = match val.to_lowercase().as_str() {
                "memory" => StorageKind::Memory,
                "jsonl" => StorageKind::Jsonl,
                _ => {
                    return Err(crate::Error::Config(
                        "CIVIC_STORAGE must be memory or jsonl".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("CIVIC_HTTP_ADDR") {
            self.http_addr = val;
        }

        if let Ok(val) = std::env::var("CIVIC_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Ok(val) = std::env::var("CIVIC_LOG_FORMAT") {
            self.log_format = match val.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(crate::Error::Config(
                        "CIVIC_LOG_FORMAT must be pretty or json".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("CIVIC_MAX_IMAGES") {
            self.max_images = val.parse().map_err(|_| {
                crate::Error::Config("CIVIC_MAX_IMAGES must be a number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("CIVIC_EVENT_BUFFER") {
            self.event_buffer = val.parse().map_err(|_| {
                crate::Error::Config("CIVIC_EVENT_BUFFER must be a number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("CIVIC_CATALOG_FILE") {
            self.catalog_file = if val.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - http_addr is not a socket address
    /// - max_images is outside 1-10
    /// - event_buffer is zero
    /// - log_level is not a known level
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if !(1..=10).contains(&self.max_images) {
            return Err(crate::Error::Config(format!(
                "max_images must be 1-10, got {}",
                self.max_images
            )));
        }

        if self.event_buffer == 0 {
            return Err(crate::Error::Config(
                "event_buffer must be greater than 0".to_string(),
            ));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(crate::Error::Config(format!(
                "log_level must be error, warn, info, debug or trace, got {}",
                other
            ))),
        }
    }

    /// Parses `http_addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is malformed.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.http_addr.parse().map_err(|_| {
            crate::Error::Config(format!("http_addr is not a socket address: {}", self.http_addr))
        })
    }

    /// Resolves the catalog file against the data directory.
    #[must_use]
    pub fn catalog_path(&self, data_dir: &Path) -> Option<PathBuf> {
        self.catalog_file.as_ref().map(|file| {
            if file.is_absolute() {
                file.clone()
            } else {
                data_dir.join(file)
            }
        })
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::Config(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "CIVIC_STORAGE",
        "CIVIC_HTTP_ADDR",
        "CIVIC_LOG_LEVEL",
        "CIVIC_LOG_FORMAT",
        "CIVIC_MAX_IMAGES",
        "CIVIC_EVENT_BUFFER",
        "CIVIC_CATALOG_FILE",
    ];

    fn clear_all_env_vars() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage, StorageKind::Jsonl);
        assert_eq!(config.http_addr, "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.max_images, 3);
        assert_eq!(config.event_buffer, 256);
        assert!(config.catalog_file.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
storage = "memory"
http_addr = "0.0.0.0:9000"
log_level = "debug"
log_format = "json"
max_images = 5
event_buffer = 16
catalog_file = "catalog.toml"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.http_addr, "0.0.0.0:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_images, 5);
        assert_eq!(config.event_buffer, 16);
        assert_eq!(
            config.catalog_path(temp_dir.path()),
            Some(temp_dir.path().join("catalog.toml"))
        );
    }

    #[test]
    fn test_config_validation_bad_addr() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "http_addr = \"nowhere\"").unwrap();
        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_validation_zero_images() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "max_images = 0").unwrap();
        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_env_override_storage() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CIVIC_STORAGE", "memory");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_storage() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CIVIC_STORAGE", "postgres");
        assert!(Config::load(temp_dir.path()).is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_max_images() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CIVIC_MAX_IMAGES", "many");
        assert!(Config::load(temp_dir.path()).is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "log_level = \"warn\"").unwrap();

        std::env::set_var("CIVIC_LOG_LEVEL", "trace");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.log_level, "trace");

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            storage: StorageKind::Memory,
            http_addr: "127.0.0.1:3000".to_string(),
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
            max_images: 4,
            event_buffer: 32,
            catalog_file: Some(PathBuf::from("catalog.toml")),
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(original, loaded);
    }
}
