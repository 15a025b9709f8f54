//! pending-reminders - print the reminders still on your plate
//!
//! This library reads reminders from a callback-based reminder store and
//! exposes them through `async` calls. The store reports each fetch through
//! a completion handler that may run on any thread; the bridge suspends the
//! caller until that handler fires exactly once.
//!
//! # Modules
//!
//! * [`app`] - Command flow: access check, load, print
//! * [`bridge`] - Async bridge over callback-based fetches
//! * [`config`] - Application configuration management
//! * [`store`] - Reminder store interface and the SQLite store
//! * [`output`] - Plain-text rendering
//! * [`utils`] - Utility functions and helpers

/// Command flow used by the binary
pub mod app;

/// Suspend/resume bridge over the store's fetch callbacks
pub mod bridge;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup
pub mod logger;

/// Plain-text output of reminders
pub mod output;

/// Repository layer for database operations
pub mod repositories;

/// Reminder store abstraction and implementations
pub mod store;

/// Utility functions for date/time handling
pub mod utils;

pub use bridge::{BridgeOptions, CompletionBoundary, ReminderBridge};
pub use store::{Collection, CompletionState, Filter, Reminder, ReminderStore};
