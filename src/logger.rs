//! Logging setup.
//!
//! Routes the `log` facade through a `fern` dispatch. With file logging
//! enabled, records at the configured level go to the log file; otherwise
//! only warnings and errors reach stderr. Stdout is left for reminder titles.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

/// Location of the log file
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

/// Format a record as `[HH:MM:SS.mmm] LEVEL target: message`
fn format_line(message: &std::fmt::Arguments, record: &log::Record) -> String {
    format!(
        "[{}] {:<5} {}: {}",
        Local::now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        message
    )
}

/// Build the dispatch described by `config` without installing it
pub fn build_dispatch(config: &LoggingConfig) -> Result<fern::Dispatch> {
    let base = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("{}", format_line(message, record))));

    if !config.enabled {
        return Ok(base.level(log::LevelFilter::Warn).chain(std::io::stderr()));
    }

    let level = config.level_filter()?;
    let log_path = get_log_file_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    Ok(base
        .level(level)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(file))
}

/// Install the global logger
pub fn init(config: &LoggingConfig) -> Result<()> {
    build_dispatch(config)?
        .apply()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
