//! Reminder store abstraction.
//!
//! This module defines the interface a reminder store must implement, along
//! with the data types that cross it. A store hands out reminders through a
//! single-shot, callback-driven `fetch`; [`crate::bridge`] turns that into an
//! `async` call.
//!
//! The abstraction consists of:
//! - [`ReminderStore`]: access request, default collection lookup, filter
//!   construction and the callback-based fetch
//! - [`Filter`]: an immutable predicate built by the store for one query
//! - [`Reminder`] / [`Collection`]: store-owned data handed to callers

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// SQLite-backed store implementation
pub mod sqlite;

pub use sqlite::SqliteStore;

/// Completion state of a reminder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionState {
    Incomplete,
    CompletedOn(DateTime<Utc>),
}

/// A to-do entry as returned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub title: Option<String>,
    pub completion: CompletionState,
}

impl Reminder {
    /// Create an incomplete reminder.
    pub fn incomplete(id: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.map(str::to_string),
            completion: CompletionState::Incomplete,
        }
    }

    /// Create a reminder completed at `at`.
    pub fn completed(id: impl Into<String>, title: Option<&str>, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.map(str::to_string),
            completion: CompletionState::CompletedOn(at),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.completion, CompletionState::CompletedOn(_))
    }

    pub fn completion_date(&self) -> Option<DateTime<Utc>> {
        match self.completion {
            CompletionState::Incomplete => None,
            CompletionState::CompletedOn(at) => Some(at),
        }
    }
}

/// A calendar (list) that reminders belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub title: String,
}

/// Which completion states a filter selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionScope {
    Any,
    Incomplete,
    Completed,
}

/// Range over completion dates: `start` inclusive, `end` exclusive.
///
/// An unbounded range (`DateRange::default()`) places no restriction. A
/// bounded range never matches an incomplete reminder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Everything from `start` onwards, with no upper bound.
    pub fn since(start: DateTime<Utc>) -> Self {
        Self { start: Some(start), end: None }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at < end)
    }
}

/// Opaque predicate selecting which reminders a fetch returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    collection_ids: Vec<String>,
    scope: CompletionScope,
    range: DateRange,
}

impl Filter {
    pub fn new(collections: &[Collection], scope: CompletionScope, range: DateRange) -> Self {
        Self {
            collection_ids: collections.iter().map(|c| c.id.clone()).collect(),
            scope,
            range,
        }
    }

    pub fn collection_ids(&self) -> &[String] {
        &self.collection_ids
    }

    pub fn scope(&self) -> CompletionScope {
        self.scope
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Whether `reminder` satisfies the completion scope and date range.
    ///
    /// Collection membership is not checked here: a [`Reminder`] does not
    /// carry its collection, so that part is left to the store's query.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        let scope_ok = match self.scope {
            CompletionScope::Any => true,
            CompletionScope::Incomplete => !reminder.is_completed(),
            CompletionScope::Completed => reminder.is_completed(),
        };
        if !scope_ok {
            return false;
        }
        if self.range.is_unbounded() {
            return true;
        }
        reminder.completion_date().is_some_and(|at| self.range.contains(at))
    }
}

/// Outcome of an access request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessStatus {
    Granted,
    Denied,
}

/// Completion handler passed to [`ReminderStore::fetch`].
///
/// `None` means the store had no data to report. The handler is `Fn` rather
/// than `FnOnce` because stores backed by foreign callbacks cannot promise a
/// single invocation at the type level; callers must tolerate repeats.
pub type FetchCompletion = Box<dyn Fn(Option<Vec<Reminder>>) + Send + Sync + 'static>;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Reminder access denied: {0}")]
    AccessDenied(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Interface every reminder store implements.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Returns the store type identifier (e.g., "sqlite").
    fn store_type(&self) -> &str;

    /// Ask for permission to read reminders.
    async fn request_access(&self) -> Result<AccessStatus, StoreError>;

    /// The collection new reminders go to, if one exists.
    async fn default_collection(&self) -> Option<Collection>;

    /// Build a filter over `collections`.
    fn build_filter(&self, collections: &[Collection], scope: CompletionScope, range: DateRange) -> Filter {
        Filter::new(collections, scope, range)
    }

    /// Start a fetch. `completion` is invoked once, possibly on another
    /// thread, after this call returns or before it does.
    fn fetch(&self, filter: &Filter, completion: FetchCompletion);
}
