mod common;

use std::sync::Arc;

use common::{now, scenario, Access, Delivery, FakeStore};
use pending_reminders::app;
use pending_reminders::bridge::BridgeOptions;
use pending_reminders::store::{Reminder, StoreError};

async fn run(store: &Arc<FakeStore>) -> (anyhow::Result<usize>, String) {
    let mut out = Vec::new();
    let result = app::run_at(Arc::clone(store), BridgeOptions::default(), &mut out, now()).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_prints_scenario_titles() {
    let store = Arc::new(FakeStore::new(scenario()).delivery(Delivery::Thread));
    let (result, output) = run(&store).await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(output, "Buy milk\nCall Bob\n");
}

#[tokio::test]
async fn test_missing_title_prints_unknown() {
    let store = Arc::new(FakeStore::new(vec![
        Reminder::incomplete("1", None),
        Reminder::incomplete("2", Some("Water plants")),
    ]));
    let (result, output) = run(&store).await;

    assert!(result.is_ok());
    assert_eq!(output, "Unknown\nWater plants\n");
}

#[tokio::test]
async fn test_denied_access_fails_before_fetch() {
    let store = Arc::new(FakeStore::new(scenario()).access(Access::Denied));
    let (result, output) = run(&store).await;

    let err = result.unwrap_err();
    assert!(app::is_access_denied(&err));
    assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::AccessDenied(_))));
    assert_eq!(store.fetch_calls(), 0);
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_failed_access_request_is_denial() {
    let store = Arc::new(FakeStore::new(scenario()).access(Access::Fails));
    let (result, _) = run(&store).await;

    let err = result.unwrap_err();
    assert!(app::is_access_denied(&err));
    assert!(err.to_string().contains("permission service offline"));
    assert_eq!(store.fetch_calls(), 0);
}

#[tokio::test]
async fn test_no_default_collection_prints_nothing() {
    let store = Arc::new(FakeStore::new(scenario()).without_collection());
    let (result, output) = run(&store).await;

    assert_eq!(result.unwrap(), 0);
    assert!(output.is_empty());
    assert_eq!(store.fetch_calls(), 0);
}

#[tokio::test]
async fn test_absent_results_print_nothing() {
    let store = Arc::new(FakeStore::new(scenario()).delivery(Delivery::Absent));
    let (result, output) = run(&store).await;

    assert_eq!(result.unwrap(), 0);
    assert!(output.is_empty());
    assert_eq!(store.fetch_calls(), 2);
}

#[test]
fn test_other_errors_are_not_denial() {
    let err = anyhow::anyhow!("disk full");
    assert!(!app::is_access_denied(&err));
    let err: anyhow::Error = StoreError::Database("locked".to_string()).into();
    assert!(!app::is_access_denied(&err));
}
