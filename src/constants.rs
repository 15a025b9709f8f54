//! Constants used throughout the application
//!
//! This module centralizes user-facing strings, file names and limits.

// Output
/// Printed in place of a reminder without a title
pub const UNKNOWN_TITLE: &str = "Unknown";

// Error Messages
pub const ERROR_ACCESS_DENIED: &str = "Reminder access denied!";
pub const ERROR_CONFIG_LOAD_FAILED: &str = "❌ Failed to load configuration";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// Files
/// Directory name used under the platform config, data and cache dirs
pub const APP_DIR_NAME: &str = "pending-reminders";
/// Config file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "pending-reminders.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "reminders.db";
pub const LOG_FILE_NAME: &str = "pending-reminders.log";

// Fetch Limits
/// Default deadline for a single store fetch, in seconds
pub const FETCH_TIMEOUT_DEFAULT_SECS: u64 = 30;
/// Largest accepted fetch deadline, in seconds
pub const FETCH_TIMEOUT_MAX_SECS: u64 = 3600;
