use std::collections::HashSet;
use studyboard_core::{
    field, open_store_in_memory, EntityKind, EntityStore, FieldMap, KeyValueStore, Record,
    SqliteKvStore, StoreError,
};
use uuid::Uuid;

fn task_fields(title: &str) -> FieldMap {
    FieldMap::from([
        (field::TITLE.to_string(), title.into()),
        (field::DESCRIPTION.to_string(), "details".into()),
    ])
}

#[test]
fn add_applies_kind_defaults() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    let record = tasks.add(task_fields("Essay")).unwrap();
    assert_eq!(record.text(field::TITLE), "Essay");
    assert_eq!(record.text(field::PRIORITY), "low");
    assert!(!record.flag(field::COMPLETED));
    assert!(record.created_at > 0);
}

#[test]
fn explicit_fields_override_defaults() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    let mut fields = task_fields("Lab report");
    fields.insert(field::PRIORITY.to_string(), "high".into());
    let record = tasks.add(fields).unwrap();
    assert_eq!(record.text(field::PRIORITY), "high");
}

#[test]
fn persistence_roundtrip_is_lossless() {
    let conn = open_store_in_memory().unwrap();

    let spec = EntityKind::Task.spec();
    let mut written = Vec::new();
    {
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let mut tasks = EntityStore::open(kv, spec);
        written.push(tasks.add(task_fields("one")).unwrap());
        written.push(tasks.add(task_fields("two")).unwrap());
        let updated = tasks
            .update(
                written[0].id,
                FieldMap::from([(field::PRIORITY.to_string(), "medium".into())]),
            )
            .unwrap();
        written[0] = updated;
    }

    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let reopened = EntityStore::open(kv, spec);
    assert_eq!(reopened.all(), written);
}

#[test]
fn update_merges_shallowly_and_keeps_identity() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut notes = EntityStore::open(kv, EntityKind::Note.spec());

    let created = notes
        .add(FieldMap::from([
            (field::TITLE.to_string(), "Ideas".into()),
            (field::CONTENT.to_string(), "old text".into()),
        ]))
        .unwrap();

    let updated = notes
        .update(
            created.id,
            FieldMap::from([(field::CONTENT.to_string(), "new text".into())]),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.text(field::TITLE), "Ideas");
    assert_eq!(updated.text(field::CONTENT), "new text");
}

#[test]
fn update_absent_id_signals_not_found_and_leaves_collection_unchanged() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    tasks.add(task_fields("kept")).unwrap();
    let before = tasks.all();

    let err = tasks
        .update(Uuid::new_v4(), task_fields("ghost"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(tasks.all(), before);
}

#[test]
fn delete_absent_id_is_a_noop() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    tasks.add(task_fields("kept")).unwrap();
    let before = tasks.all();

    tasks.delete(Uuid::new_v4()).unwrap();
    assert_eq!(tasks.all(), before);
}

#[test]
fn delete_removes_only_the_target() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    let a = tasks.add(task_fields("a")).unwrap();
    let b = tasks.add(task_fields("b")).unwrap();

    tasks.delete(a.id).unwrap();
    let remaining = tasks.all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
}

#[test]
fn all_returns_a_defensive_copy_in_insertion_order() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut notes = EntityStore::open(kv, EntityKind::Note.spec());

    let first = notes
        .add(FieldMap::from([
            (field::TITLE.to_string(), "first".into()),
            (field::CONTENT.to_string(), "x".into()),
        ]))
        .unwrap();
    let second = notes
        .add(FieldMap::from([
            (field::TITLE.to_string(), "second".into()),
            (field::CONTENT.to_string(), "y".into()),
        ]))
        .unwrap();

    let mut copy = notes.all();
    assert_eq!(copy[0].id, first.id);
    assert_eq!(copy[1].id, second.id);

    // Mutating the copy must not affect the store.
    copy.clear();
    assert_eq!(notes.len(), 2);
}

#[test]
fn corrupt_persisted_collection_loads_as_empty() {
    let conn = open_store_in_memory().unwrap();
    let spec = EntityKind::Note.spec();

    let mut kv = SqliteKvStore::try_new(&conn).unwrap();
    kv.put_raw(spec.storage_key, "{definitely not an array").unwrap();

    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let notes = EntityStore::open(kv, spec);
    assert!(notes.is_empty());
}

#[test]
fn toggle_flag_flips_completion_through_update() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    let record = tasks.add(task_fields("flip me")).unwrap();
    assert!(!record.flag(field::COMPLETED));

    let toggled = tasks.toggle_flag(record.id, field::COMPLETED).unwrap();
    assert!(toggled.flag(field::COMPLETED));

    let back = tasks.toggle_flag(record.id, field::COMPLETED).unwrap();
    assert!(!back.flag(field::COMPLETED));
}

#[test]
fn id_generation_stays_unique_across_ten_thousand_records() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let record = Record::new(FieldMap::new());
        assert!(seen.insert(record.id), "duplicate id generated");
    }
}

#[test]
fn sequential_adds_produce_distinct_ids_in_the_store() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let mut tasks = EntityStore::open(kv, EntityKind::Task.spec());

    let mut seen = HashSet::new();
    for index in 0..200 {
        let record = tasks.add(task_fields(&format!("task {index}"))).unwrap();
        assert!(seen.insert(record.id));
    }
    assert_eq!(tasks.len(), 200);
}
