//! Configuration management for pending-reminders
//!
//! This module handles loading, parsing, and validation of configuration files.
//! Every setting is optional; without a file the defaults apply.

use crate::bridge::{BridgeOptions, CompletionBoundary};
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DATABASE_FILE_NAME, FETCH_TIMEOUT_DEFAULT_SECS,
    FETCH_TIMEOUT_MAX_SECS, LOCAL_CONFIG_FILE,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub fetch: FetchConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

/// Reminder store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the reminder database (defaults to the platform data dir)
    pub database_path: Option<PathBuf>,
    /// Title of the calendar to read instead of the store's default
    pub default_calendar: Option<String>,
}

/// Fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Deadline for a single fetch in seconds (0 = wait indefinitely)
    pub timeout_secs: u64,
    /// Issue the incomplete and completed queries at the same time
    pub concurrent: bool,
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryConfig {
    /// Where "completed today" starts
    /// Options: "start_of_day", "now"
    pub completed_since: CompletionBoundary,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to the log file
    pub enabled: bool,
    /// Log level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: FETCH_TIMEOUT_DEFAULT_SECS,
            concurrent: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.store.database_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("database_path cannot be empty");
            }
        }

        if let Some(calendar) = &self.store.default_calendar {
            if calendar.trim().is_empty() {
                anyhow::bail!("default_calendar cannot be empty");
            }
        }

        if self.fetch.timeout_secs > FETCH_TIMEOUT_MAX_SECS {
            anyhow::bail!(
                "timeout_secs cannot exceed {} ({} hour)",
                FETCH_TIMEOUT_MAX_SECS,
                FETCH_TIMEOUT_MAX_SECS / 3600
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Options for the fetch bridge
    pub fn bridge_options(&self) -> BridgeOptions {
        BridgeOptions {
            timeout: self.fetch.timeout(),
            concurrent: self.fetch.concurrent,
            boundary: self.query.completed_since,
        }
    }

    /// Resolve the database path, falling back to the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store.database_path {
            return Ok(path.clone());
        }

        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(DATABASE_FILE_NAME))
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# pending-reminders Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
