use serde_json::json;
use uuid::Uuid;

use super::file::FileBaselineStore;
use super::memory::MemoryBaselineStore;
use super::types::{BaselineKey, BaselineRecord};
use super::BaselineStore;
use crate::snapshot::{ColumnDef, DatasetSnapshot};

fn sample_snapshot() -> DatasetSnapshot {
    DatasetSnapshot::new(
        vec![
            ColumnDef::new("id", "int"),
            ColumnDef::new("amount", "float"),
        ],
        vec![
            vec![json!(1), json!(10.5)],
            vec![json!(2), json!(20.0)],
            vec![json!(3), json!(30.25)],
        ],
    )
}

fn sample_key() -> BaselineKey {
    BaselineKey::new(Uuid::new_v4(), Uuid::new_v4())
}

#[test]
fn test_record_metadata_matches_snapshot() {
    let record = BaselineRecord::from_snapshot(sample_snapshot());
    assert_eq!(record.row_count, 3);
    assert_eq!(record.columns, vec!["id", "amount"]);
    assert_eq!(record.schema.get("amount"), Some(&"float".to_string()));
    assert_eq!(record.volume_history, vec![3]);
    assert!(record.column_distributions.is_empty());
}

#[test]
fn test_volume_history_eviction() {
    let mut record = BaselineRecord::from_snapshot(sample_snapshot());
    for count in 10..20u64 {
        record.record_volume(count, 5);
    }
    assert_eq!(record.volume_history.len(), 5);
    // Oldest entries (including the seeded count) evicted first.
    assert_eq!(record.volume_history, vec![15, 16, 17, 18, 19]);
}

#[test]
fn test_memory_store_get_after_put() {
    let store = MemoryBaselineStore::new();
    let key = sample_key();

    assert!(store.get(&key).unwrap().is_none());

    let stored = store
        .put(&key, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();
    let fetched = store.get(&key).unwrap().unwrap();

    assert_eq!(fetched.row_count, stored.row_count);
    assert_eq!(fetched.columns, stored.columns);
}

#[test]
fn test_memory_store_put_overwrites() {
    let store = MemoryBaselineStore::new();
    let key = sample_key();

    store
        .put(&key, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();

    let smaller = DatasetSnapshot::new(
        vec![ColumnDef::new("id", "int")],
        vec![vec![json!(1)]],
    );
    store
        .put(&key, BaselineRecord::from_snapshot(smaller))
        .unwrap();

    let fetched = store.get(&key).unwrap().unwrap();
    assert_eq!(fetched.row_count, 1);
    assert_eq!(fetched.columns, vec!["id"]);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_memory_store_delete() {
    let store = MemoryBaselineStore::new();
    let key = sample_key();

    assert!(!store.delete(&key).unwrap());
    store
        .put(&key, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();
    assert!(store.delete(&key).unwrap());
    assert!(store.get(&key).unwrap().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBaselineStore::new(dir.path());
    let key = sample_key();

    let mut record = BaselineRecord::from_snapshot(sample_snapshot());
    record.record_volume(42, 30);
    record.set_column_distribution(
        "amount",
        [("10.5".to_string(), 1u64)].into_iter().collect(),
    );
    store.put(&key, record).unwrap();

    let loaded = store.get(&key).unwrap().unwrap();
    assert_eq!(loaded.row_count, 3);
    assert_eq!(loaded.columns, vec!["id", "amount"]);
    assert_eq!(loaded.volume_history, vec![3, 42]);
    assert!(loaded.column_distribution("amount").is_some());
}

#[test]
fn test_file_store_missing_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBaselineStore::new(dir.path());
    let key = sample_key();

    assert!(store.get(&key).unwrap().is_none());
    assert!(!store.delete(&key).unwrap());

    store
        .put(&key, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();
    assert!(store.delete(&key).unwrap());
    assert!(store.get(&key).unwrap().is_none());
}

#[test]
fn test_file_store_reads_never_tear_during_overwrites() {
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileBaselineStore::new(dir.path()));
    let key = sample_key();

    store
        .put(&key, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();

    let writer = {
        let store = store.clone();
        std::thread::spawn(move || {
            for i in 0..200u64 {
                let mut record = BaselineRecord::from_snapshot(sample_snapshot());
                record.record_volume(i, 30);
                store.put(&key, record).unwrap();
            }
        })
    };

    // Every read while the writer is replacing the file must yield a fully
    // parsed record, never a deserialization error from a torn file.
    for _ in 0..200 {
        let record = store.get(&key).unwrap().expect("record present");
        assert_eq!(record.columns, vec!["id", "amount"]);
    }
    writer.join().unwrap();

    // No scratch files left behind.
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_keys_are_isolated() {
    let store = MemoryBaselineStore::new();
    let key_a = sample_key();
    let key_b = sample_key();

    store
        .put(&key_a, BaselineRecord::from_snapshot(sample_snapshot()))
        .unwrap();

    assert!(store.get(&key_b).unwrap().is_none());
    assert!(store.get(&key_a).unwrap().is_some());
}
