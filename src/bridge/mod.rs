//! Async bridge over the callback-based store fetch.
//!
//! [`ReminderBridge`] turns [`ReminderStore::fetch`] into an `async fn` that
//! suspends until the store's completion fires, then filters and merges the
//! results of one or more fetches into a single ordered list.
//!
//! Every fetch goes through a [`PendingCall`]. The completion handed to the
//! store owns the only strong reference to it, so a store that drops the
//! completion without calling it also drops the sender and the caller wakes
//! up with an empty list instead of hanging.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::store::{CompletionScope, DateRange, Filter, Reminder, ReminderStore};
use crate::utils::datetime;

pub mod pending;

pub use pending::{PendingCall, ResumeOutcome};

/// Where "completed today" starts.
///
/// Neither variant sets an upper bound, so completions dated in the future
/// are included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionBoundary {
    /// Local midnight of the day `now` falls on.
    #[default]
    StartOfDay,
    /// The instant `now` itself.
    Now,
}

impl CompletionBoundary {
    pub fn resolve<Tz: TimeZone>(self, now: &DateTime<Tz>) -> DateTime<Utc> {
        match self {
            CompletionBoundary::StartOfDay => datetime::start_of_day(now),
            CompletionBoundary::Now => now.with_timezone(&Utc),
        }
    }
}

/// Tuning for a [`ReminderBridge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeOptions {
    /// How long a single fetch may stay suspended. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Issue the two queries of the composite load at the same time.
    pub concurrent: bool,
    pub boundary: CompletionBoundary,
}

/// Async front end for a [`ReminderStore`].
pub struct ReminderBridge<S: ?Sized> {
    store: Arc<S>,
    options: BridgeOptions,
}

impl<S> ReminderBridge<S>
where
    S: ReminderStore + ?Sized,
{
    pub fn new(store: Arc<S>, options: BridgeOptions) -> Self {
        Self { store, options }
    }

    /// Run one store fetch and wait for its completion.
    ///
    /// An absent result, a dropped completion and an expired deadline all
    /// come back as an empty list.
    pub async fn fetch_one(&self, filter: &Filter) -> Vec<Reminder> {
        let (call, mut rx) = PendingCall::suspend();
        let id = call.id();
        let watch = Arc::downgrade(&call);

        debug!("Fetch {} issued to {} store", id, self.store.store_type());
        self.store.fetch(
            filter,
            Box::new(move |result| {
                let reminders = result.unwrap_or_else(|| {
                    debug!("Fetch {} reported no data", call.id());
                    Vec::new()
                });
                // Late and duplicate completions are logged inside resume.
                call.resume(reminders);
            }),
        );

        let received = match self.options.timeout {
            None => (&mut rx).await.ok(),
            Some(limit) => match tokio::time::timeout(limit, &mut rx).await {
                Ok(received) => received.ok(),
                Err(_) if watch.upgrade().is_some_and(|call| call.abandon()) => {
                    warn!("Fetch {} timed out after {:?}", id, limit);
                    return Vec::new();
                }
                // The completion beat the abandon.
                Err(_) => rx.try_recv().ok(),
            },
        };

        received.unwrap_or_else(|| {
            warn!("Fetch {} ended without a completion", id);
            Vec::new()
        })
    }

    /// Incomplete reminders in the default collection.
    pub async fn load_incomplete(&self) -> Vec<Reminder> {
        let Some(collection) = self.store.default_collection().await else {
            info!("No default calendar, nothing to load");
            return Vec::new();
        };

        let filter = self
            .store
            .build_filter(&[collection], CompletionScope::Incomplete, DateRange::default());
        self.fetch_filtered(&filter).await
    }

    /// Incomplete reminders followed by reminders completed today.
    pub async fn load_incomplete_and_completed_today(&self) -> Vec<Reminder> {
        self.load_incomplete_and_completed_today_at(chrono::Local::now()).await
    }

    /// Same as [`Self::load_incomplete_and_completed_today`] with an explicit
    /// clock reading.
    pub async fn load_incomplete_and_completed_today_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Vec<Reminder> {
        let Some(collection) = self.store.default_collection().await else {
            info!("No default calendar, nothing to load");
            return Vec::new();
        };

        let since = self.options.boundary.resolve(&now);
        let collections = [collection];
        let incomplete = self
            .store
            .build_filter(&collections, CompletionScope::Incomplete, DateRange::default());
        let completed = self
            .store
            .build_filter(&collections, CompletionScope::Completed, DateRange::since(since));

        let (mut reminders, completed_today) = if self.options.concurrent {
            tokio::join!(self.fetch_filtered(&incomplete), self.fetch_filtered(&completed))
        } else {
            let first = self.fetch_filtered(&incomplete).await;
            let second = self.fetch_filtered(&completed).await;
            (first, second)
        };

        info!(
            "Loaded {} incomplete and {} completed since {}",
            reminders.len(),
            completed_today.len(),
            since
        );
        reminders.extend(completed_today);
        reminders
    }

    /// Fetch and re-check every result against `filter`.
    async fn fetch_filtered(&self, filter: &Filter) -> Vec<Reminder> {
        let mut reminders = self.fetch_one(filter).await;
        let before = reminders.len();
        reminders.retain(|reminder| filter.matches(reminder));
        if reminders.len() != before {
            debug!("Dropped {} reminders outside the filter", before - reminders.len());
        }
        reminders
    }
}
