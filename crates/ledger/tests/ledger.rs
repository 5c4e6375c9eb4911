use std::collections::HashSet;

use ledger::{
    JsonStore, Ledger, LedgerEvent, MemoryStore, Record, Store, StoreError, ValidationError,
};
use uuid::Uuid;

/// Store double whose disk is permanently on fire.
struct FailingStore;

impl Store for FailingStore {
    async fn load(&self) -> Result<Option<Vec<Record>>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("load refused")))
    }

    async fn save(&self, _records: &[Record]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("save refused")))
    }
}

fn test_data_dir() -> std::path::PathBuf {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();
    root.join(Uuid::new_v4().to_string())
}

#[tokio::test]
async fn validation_failures_leave_ledger_unchanged() {
    let mut ledger = Ledger::open(MemoryStore::new()).await;

    assert_eq!(
        ledger.add_expense("", "10").await.unwrap_err(),
        ValidationError::EmptyName
    );
    assert_eq!(
        ledger.add_expense("Coffee", "").await.unwrap_err(),
        ValidationError::EmptyAmount
    );
    assert_eq!(
        ledger.add_expense("Coffee", "abc").await.unwrap_err(),
        ValidationError::InvalidAmount("abc".to_string())
    );

    assert!(ledger.records().is_empty());
    assert_eq!(ledger.total(), 0.0);
}

#[tokio::test]
async fn appends_preserve_order_and_total() {
    let mut ledger = Ledger::open(MemoryStore::new()).await;

    ledger.add_expense("Coffee", "3.50").await.unwrap();
    ledger.add_expense("Book", "12.00").await.unwrap();

    let records = ledger.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Coffee");
    assert_eq!(records[1].name, "Book");
    assert_eq!(ledger.total(), 15.50);
}

#[tokio::test]
async fn total_matches_insertion_order_sum() {
    let mut ledger = Ledger::open(MemoryStore::new()).await;
    let amounts = ["0.1", "0.2", "19.99", "-5.25", "1234.56"];

    for (index, amount) in amounts.iter().enumerate() {
        ledger
            .add_expense(&format!("Item {index}"), amount)
            .await
            .unwrap();
    }

    let expected = ledger
        .records()
        .iter()
        .map(|record| record.amount)
        .fold(0.0, |sum, amount| sum + amount);
    assert_eq!(ledger.total(), expected);
}

#[tokio::test]
async fn ids_stay_unique_under_stress() {
    let mut ledger = Ledger::open(MemoryStore::new()).await;

    for index in 0..1000 {
        ledger
            .add_expense(&format!("Item {index}"), "1.0")
            .await
            .unwrap();
    }

    let ids: HashSet<&str> = ledger
        .records()
        .iter()
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(ids.len(), 1000);
}

#[tokio::test]
async fn json_store_round_trips_records() {
    let data_dir = test_data_dir();

    let mut ledger = Ledger::open(JsonStore::new(&data_dir)).await;
    ledger.add_expense("Coffee", "3.50").await.unwrap();
    ledger.add_expense("Book", "12.00").await.unwrap();
    let saved: Vec<Record> = ledger.records().to_vec();
    drop(ledger);

    let reopened = Ledger::open(JsonStore::new(&data_dir)).await;
    assert!(reopened.startup_error().is_none());

    let records = reopened.records();
    assert_eq!(records.len(), saved.len());
    for (loaded, original) in records.iter().zip(&saved) {
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.amount, original.amount);
    }
    assert_eq!(reopened.total(), 15.50);
}

#[tokio::test]
async fn missing_blob_is_a_first_run() {
    let ledger = Ledger::open(JsonStore::new(test_data_dir())).await;

    assert!(ledger.records().is_empty());
    assert!(ledger.startup_error().is_none());
}

#[tokio::test]
async fn load_failure_degrades_to_empty_ledger() {
    let ledger = Ledger::open(FailingStore).await;

    assert!(ledger.records().is_empty());
    assert_eq!(ledger.total(), 0.0);
    assert!(matches!(ledger.startup_error(), Some(StoreError::Io(_))));
}

#[tokio::test]
async fn save_failure_keeps_record_and_reports_it() {
    let mut ledger = Ledger::open(FailingStore).await;
    let mut events = ledger.subscribe();

    ledger.add_expense("Coffee", "3.50").await.unwrap();

    assert_eq!(ledger.records().len(), 1);
    assert_eq!(ledger.total(), 3.50);

    assert!(matches!(
        events.try_recv().unwrap(),
        LedgerEvent::SaveFailed(_)
    ));
    assert_eq!(events.try_recv().unwrap(), LedgerEvent::Changed);
}

#[tokio::test]
async fn appends_notify_subscribers() {
    let mut ledger = Ledger::open(MemoryStore::new()).await;
    let mut events = ledger.subscribe();

    ledger.add_expense("Coffee", "3.50").await.unwrap();

    assert_eq!(events.try_recv().unwrap(), LedgerEvent::Changed);
}
