//! Config struct, persistence, and path resolution.
//!
//! Covers:
//! - `load` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - The per-user data directory holding the persisted version record

use crate::error::ConfigError;
use crate::types::{LogLevel, UpdateConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted version record inside the data directory.
const VERSION_STATE_FILE: &str = "update-state.json";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application identifier; namespaces the persisted record on disk
    #[serde(default = "crate::defaults::app_id")]
    pub app_id: String,

    /// Log level for the debug log file (overridden by `--log-level` and `RUST_LOG`)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Update coordination settings
    #[serde(default)]
    pub updates: UpdateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: crate::defaults::app_id(),
            log_level: LogLevel::default(),
            updates: UpdateConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application identifier
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set the timer interval in milliseconds
    pub fn with_check_interval_ms(mut self, interval_ms: u64) -> Self {
        self.updates.check_interval_ms = interval_ms;
        self
    }

    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults if the file is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            log::info!("Loading existing config from {:?}", config_path);
            let contents = fs::read_to_string(config_path).map_err(ConfigError::from)?;
            let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
            config.validate()?;
            Ok(config)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, config_path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Check field values that serde cannot reject on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::Validation("app_id must not be empty".into()));
        }
        if self
            .app_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '.')
        {
            return Err(ConfigError::Validation(format!(
                "app_id '{}' must not contain path separators or dots",
                self.app_id
            )));
        }
        if self.updates.check_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "updates.check_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("liftoff")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/liftoff
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("liftoff")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Per-user data directory for this application's persisted update record
    pub fn data_dir(&self) -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("liftoff").join(&self.app_id)
    }

    /// Path of the persisted version record (`<data_dir>/update-state.json`)
    pub fn version_state_path(&self) -> PathBuf {
        self.data_dir().join(VERSION_STATE_FILE)
    }
}
