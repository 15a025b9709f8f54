//! One-shot rendezvous between a store completion and a suspended caller.

use std::sync::{Arc, Mutex};

use log::{debug, error};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::store::Reminder;

enum CallState {
    Suspended(oneshot::Sender<Vec<Reminder>>),
    Resumed,
    Abandoned,
}

/// What happened when a completion tried to resume a [`PendingCall`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The caller was woken with the result.
    Resumed,
    /// The caller had already given up waiting; the result was dropped.
    Late,
    /// The call had already been resumed; the result was dropped.
    Duplicate,
}

/// Record of one in-flight fetch.
///
/// The state leaves `Suspended` exactly once, under the mutex, so any number
/// of completions racing from any threads wake the caller at most once.
pub struct PendingCall {
    id: Uuid,
    state: Mutex<CallState>,
}

impl PendingCall {
    /// Create a suspended call and the receiver its caller waits on.
    pub fn suspend() -> (Arc<Self>, oneshot::Receiver<Vec<Reminder>>) {
        let (tx, rx) = oneshot::channel();
        let call = Arc::new(Self {
            id: Uuid::new_v4(),
            state: Mutex::new(CallState::Suspended(tx)),
        });
        (call, rx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_suspended(&self) -> bool {
        matches!(*self.lock(), CallState::Suspended(_))
    }

    /// Hand `reminders` to the waiting caller.
    pub fn resume(&self, reminders: Vec<Reminder>) -> ResumeOutcome {
        let mut state = self.lock();
        match std::mem::replace(&mut *state, CallState::Resumed) {
            CallState::Suspended(tx) => {
                drop(state);
                if tx.send(reminders).is_err() {
                    debug!("Pending call {} resumed after its caller went away", self.id);
                }
                ResumeOutcome::Resumed
            }
            CallState::Abandoned => {
                *state = CallState::Abandoned;
                debug!("Pending call {} completed after its deadline, result dropped", self.id);
                ResumeOutcome::Late
            }
            CallState::Resumed => {
                error!("Pending call {} completed more than once, result dropped", self.id);
                ResumeOutcome::Duplicate
            }
        }
    }

    /// Give up waiting. Returns `false` if the call was no longer suspended.
    pub fn abandon(&self) -> bool {
        let mut state = self.lock();
        if matches!(*state, CallState::Suspended(_)) {
            *state = CallState::Abandoned;
            true
        } else {
            false
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CallState> {
        // A poisoned lock only means a completion panicked mid-transition;
        // the state value itself is still one of the three variants.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
