//! Command entry point: access check, composite load, printing.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use log::info;

use crate::bridge::{BridgeOptions, ReminderBridge};
use crate::output;
use crate::store::{AccessStatus, ReminderStore, StoreError};

/// Print pending reminders from `store` to `out`.
///
/// Returns the number of reminders printed. Fails with
/// [`StoreError::AccessDenied`] before any fetch when the store refuses
/// access.
pub async fn run<S, W>(store: Arc<S>, options: BridgeOptions, out: &mut W) -> Result<usize>
where
    S: ReminderStore + ?Sized,
    W: Write,
{
    run_at(store, options, out, Local::now()).await
}

/// [`run`] with an explicit clock reading.
pub async fn run_at<S, W, Tz>(store: Arc<S>, options: BridgeOptions, out: &mut W, now: DateTime<Tz>) -> Result<usize>
where
    S: ReminderStore + ?Sized,
    W: Write,
    Tz: TimeZone,
{
    ensure_access(store.as_ref()).await?;

    let bridge = ReminderBridge::new(store, options);
    let reminders = bridge.load_incomplete_and_completed_today_at(now).await;
    info!("Printing {} reminders", reminders.len());

    output::print_reminders(out, &reminders).context("Failed to write reminders")?;
    Ok(reminders.len())
}

async fn ensure_access<S>(store: &S) -> Result<(), StoreError>
where
    S: ReminderStore + ?Sized,
{
    match store.request_access().await {
        Ok(AccessStatus::Granted) => Ok(()),
        Ok(AccessStatus::Denied) => Err(StoreError::AccessDenied(format!(
            "{} store refused access",
            store.store_type()
        ))),
        Err(StoreError::AccessDenied(reason)) => Err(StoreError::AccessDenied(reason)),
        Err(e) => Err(StoreError::AccessDenied(e.to_string())),
    }
}

/// Whether `err` is an access failure that should end the process.
pub fn is_access_denied(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<StoreError>(), Some(StoreError::AccessDenied(_)))
}
