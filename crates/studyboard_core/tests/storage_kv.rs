use rusqlite::Connection;
use studyboard_core::storage::migrations::{apply_migrations, latest_version};
use studyboard_core::{
    open_store, open_store_in_memory, KeyValueStore, SqliteKvStore, StorageError,
};

#[test]
fn get_returns_none_for_missing_key() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(kv.get_raw("dashboard_tasks").unwrap(), None);
    assert_eq!(kv.get_json::<Vec<String>>("dashboard_tasks").unwrap(), None);
}

#[test]
fn put_overwrites_the_whole_value() {
    let conn = open_store_in_memory().unwrap();
    let mut kv = SqliteKvStore::try_new(&conn).unwrap();

    kv.put_raw("theme", "dark").unwrap();
    kv.put_raw("theme", "light").unwrap();
    assert_eq!(kv.get_raw("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn typed_roundtrip_through_json() {
    let conn = open_store_in_memory().unwrap();
    let mut kv = SqliteKvStore::try_new(&conn).unwrap();

    let value = vec!["a".to_string(), "b".to_string()];
    kv.put_json("list", &value).unwrap();
    assert_eq!(kv.get_json::<Vec<String>>("list").unwrap(), Some(value));
}

#[test]
fn corrupt_value_surfaces_a_decode_error() {
    let conn = open_store_in_memory().unwrap();
    let mut kv = SqliteKvStore::try_new(&conn).unwrap();

    kv.put_raw("broken", "{not json").unwrap();
    let err = kv.get_json::<Vec<String>>("broken").unwrap_err();
    assert!(matches!(err, StorageError::Decode { key, .. } if key == "broken"));
}

#[test]
fn adapter_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqliteKvStore::try_new(&conn);
    assert!(matches!(result, Err(StorageError::MissingRequiredTable("kv"))));
}

#[test]
fn migrations_are_idempotent() {
    let mut conn = open_store_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    let version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();
    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UnsupportedSchemaVersion { .. }
    ));
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.db");

    {
        let conn = open_store(&path).unwrap();
        let mut kv = SqliteKvStore::try_new(&conn).unwrap();
        kv.put_raw("dashboard_notes", "[]").unwrap();
    }

    let conn = open_store(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(kv.get_raw("dashboard_notes").unwrap().as_deref(), Some("[]"));
}
