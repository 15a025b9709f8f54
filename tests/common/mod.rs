#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pending_reminders::store::{
    AccessStatus, Collection, CompletionScope, FetchCompletion, Filter, Reminder, ReminderStore, StoreError,
};

/// How the fake store reports a fetch.
#[derive(Clone, Copy, Debug)]
pub enum Delivery {
    /// Call the completion before `fetch` returns.
    Inline,
    /// Call the completion from a new thread.
    Thread,
    /// Report an absent result.
    Absent,
    /// Call the completion twice, the second time with nothing.
    Twice,
    /// Keep the completion without calling it until `release_held`.
    Hold,
    /// Drop the completion without calling it.
    Drop,
    /// Call the completion from a new thread after a pause.
    Delayed(Duration),
    /// Answer incomplete queries after a pause and completed queries at once.
    SlowIncomplete(Duration),
}

#[derive(Clone, Copy, Debug)]
pub enum Access {
    Granted,
    Denied,
    Fails,
}

pub struct FakeStore {
    reminders: Vec<Reminder>,
    collection: Option<Collection>,
    access: Access,
    delivery: Delivery,
    ignore_filters: bool,
    fetch_calls: AtomicUsize,
    filters: Mutex<Vec<Filter>>,
    held: Mutex<Vec<(FetchCompletion, Vec<Reminder>)>>,
}

impl FakeStore {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders,
            collection: Some(Collection {
                id: "default".to_string(),
                title: "Reminders".to_string(),
            }),
            access: Access::Granted,
            delivery: Delivery::Inline,
            ignore_filters: false,
            fetch_calls: AtomicUsize::new(0),
            filters: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn without_collection(mut self) -> Self {
        self.collection = None;
        self
    }

    /// Return every reminder regardless of the filter.
    pub fn ignoring_filters(mut self) -> Self {
        self.ignore_filters = true;
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn filters(&self) -> Vec<Filter> {
        self.filters.lock().unwrap().clone()
    }

    /// Fire every held completion. Returns how many fired.
    pub fn release_held(&self) -> usize {
        let held: Vec<_> = self.held.lock().unwrap().drain(..).collect();
        let count = held.len();
        for (completion, reminders) in held {
            completion(Some(reminders));
        }
        count
    }

    fn select(&self, filter: &Filter) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|r| self.ignore_filters || filter.matches(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReminderStore for FakeStore {
    fn store_type(&self) -> &str {
        "fake"
    }

    async fn request_access(&self) -> Result<AccessStatus, StoreError> {
        match self.access {
            Access::Granted => Ok(AccessStatus::Granted),
            Access::Denied => Ok(AccessStatus::Denied),
            Access::Fails => Err(StoreError::Unavailable("permission service offline".to_string())),
        }
    }

    async fn default_collection(&self) -> Option<Collection> {
        self.collection.clone()
    }

    fn fetch(&self, filter: &Filter, completion: FetchCompletion) {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(filter.clone());
        let selected = self.select(filter);

        match self.delivery {
            Delivery::Inline => completion(Some(selected)),
            Delivery::Thread => {
                thread::spawn(move || completion(Some(selected)));
            }
            Delivery::Absent => completion(None),
            Delivery::Twice => {
                completion(Some(selected));
                completion(Some(Vec::new()));
            }
            Delivery::Hold => self.held.lock().unwrap().push((completion, selected)),
            Delivery::Drop => drop(completion),
            Delivery::Delayed(pause) => {
                thread::spawn(move || {
                    thread::sleep(pause);
                    completion(Some(selected));
                });
            }
            Delivery::SlowIncomplete(pause) => {
                let pause = if filter.scope() == CompletionScope::Incomplete {
                    pause
                } else {
                    Duration::ZERO
                };
                thread::spawn(move || {
                    thread::sleep(pause);
                    completion(Some(selected));
                });
            }
        }
    }
}

/// 2025-03-10 15:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap()
}

pub fn earlier_today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

pub fn yesterday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 9, 18, 0, 0).unwrap()
}

/// Buy milk (open), Call Bob (done today), Old task (done yesterday)
pub fn scenario() -> Vec<Reminder> {
    vec![
        Reminder::incomplete("1", Some("Buy milk")),
        Reminder::completed("2", Some("Call Bob"), earlier_today()),
        Reminder::completed("3", Some("Old task"), yesterday()),
    ]
}

pub fn titles(reminders: &[Reminder]) -> Vec<String> {
    reminders
        .iter()
        .map(|r| r.title.clone().unwrap_or_default())
        .collect()
}
