use parcel_core::db::open_db_in_memory;
use parcel_core::{DbError, Parcel, ParcelRepository, ParcelStatus, SqliteParcelStore};
use std::collections::HashMap;

fn test_parcel() -> Parcel {
    Parcel::new(
        1000,
        ParcelStatus::Registered,
        "test",
        "2024-01-01T00:00:00Z",
    )
}

#[test]
fn add_get_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let parcel = test_parcel();

    let number = store.add(&parcel).unwrap();
    assert!(number > 0);

    let loaded = store.get(number).unwrap();
    assert_eq!(loaded.number, number);
    assert_eq!(loaded.client, parcel.client);
    assert_eq!(loaded.status, parcel.status);
    assert_eq!(loaded.address, parcel.address);
    assert_eq!(loaded.created_at, parcel.created_at);

    store.delete(number).unwrap();
    let err = store.get(number).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
    ));
}

#[test]
fn add_ignores_caller_number_and_assigns_unique_numbers() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    let mut parcel = test_parcel();
    parcel.number = 42_000;
    let first = store.add(&parcel).unwrap();
    let second = store.add(&parcel).unwrap();

    assert_ne!(first, 42_000);
    assert_ne!(first, second);
}

#[test]
fn deleted_numbers_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    let first = store.add(&test_parcel()).unwrap();
    store.delete(first).unwrap();
    let second = store.add(&test_parcel()).unwrap();

    assert!(second > first);
}

#[test]
fn get_missing_number_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    assert!(store.get(999).unwrap_err().is_not_found());
}

#[test]
fn set_address_updates_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_address(number, "new test address").unwrap();

    assert_eq!(store.get(number).unwrap().address, "new test address");
}

#[test]
fn set_address_leaves_non_registered_parcel_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_address(number, "new").unwrap();
    store
        .set_status(number, ParcelStatus::Delivered.as_str())
        .unwrap();
    store.set_address(number, "x").unwrap();

    let loaded = store.get(number).unwrap();
    assert_eq!(loaded.address, "new");
    assert_eq!(loaded.status, "delivered");
}

#[test]
fn guarded_operations_on_missing_number_succeed_silently() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    store.set_address(12345, "nowhere").unwrap();
    store.delete(12345).unwrap();
    store.set_status(12345, "sent").unwrap();
}

#[test]
fn set_status_is_unconditional() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    for status in ["sent", "delivered", "registered", "returned_to_sender"] {
        store.set_status(number, status).unwrap();
        assert_eq!(store.get(number).unwrap().status, status);
    }
}

#[test]
fn delete_keeps_non_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_status(number, ParcelStatus::Sent.as_str()).unwrap();
    store.delete(number).unwrap();

    let loaded = store.get(number).unwrap();
    assert_eq!(loaded.status, "sent");
}

#[test]
fn delete_allowed_again_after_status_returns_to_registered() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let number = store.add(&test_parcel()).unwrap();

    store.set_status(number, "sent").unwrap();
    store.set_status(number, "registered").unwrap();
    store.delete(number).unwrap();

    assert!(store.get(number).unwrap_err().is_not_found());
}

#[test]
fn get_by_client_returns_every_parcel_of_that_client() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    let client = 6_808_088;

    let mut expected = HashMap::new();
    for index in 0..3 {
        let mut parcel = test_parcel();
        parcel.client = client;
        parcel.address = format!("address {index}");
        parcel.number = store.add(&parcel).unwrap();
        expected.insert(parcel.number, parcel);
    }
    store.add(&test_parcel()).unwrap();

    let stored = store.get_by_client(client).unwrap();
    assert_eq!(stored.len(), expected.len());
    for parcel in &stored {
        assert_eq!(expected.get(&parcel.number), Some(parcel));
    }

    let numbers: Vec<_> = stored.iter().map(|parcel| parcel.number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    assert_eq!(numbers, sorted);
}

#[test]
fn get_by_client_without_parcels_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);
    store.add(&test_parcel()).unwrap();

    assert!(store.get_by_client(1).unwrap().is_empty());
}

#[test]
fn values_are_bound_not_interpolated() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::new(&conn);

    let mut parcel = test_parcel();
    parcel.address = "x'); DROP TABLE parcel; --".to_string();
    let number = store.add(&parcel).unwrap();

    assert_eq!(store.get(number).unwrap().address, parcel.address);
}

#[test]
fn storage_errors_are_returned_unmodified() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE parcel;").unwrap();
    let store = SqliteParcelStore::new(&conn);

    let err = store.add(&test_parcel()).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("no such table"));
}
