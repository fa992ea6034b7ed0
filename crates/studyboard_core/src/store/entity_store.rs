//! Generic CRUD store for one entity collection.
//!
//! # Responsibility
//! - Own the in-memory collection and its persisted key for one kind.
//! - Apply creation defaults, shallow-merge updates and whole-collection
//!   persistence on every mutation.
//!
//! # Invariants
//! - Record ids are unique within the collection and never reused.
//! - `created_at` and `id` are immutable; updates merge field values only.
//! - Missing or corrupt persisted data loads as an empty collection and is
//!   logged, never surfaced to the caller.

use crate::model::kind::{EntityKind, KindSpec};
use crate::model::record::{FieldMap, Record, RecordId};
use crate::storage::kv::KeyValueStore;
use crate::store::{StoreError, StoreResult};
use log::{info, warn};

/// CRUD container for one entity kind, generic over the storage adapter.
pub struct EntityStore<S: KeyValueStore> {
    kv: S,
    spec: &'static KindSpec,
    items: Vec<Record>,
}

impl<S: KeyValueStore> EntityStore<S> {
    /// Opens the store for `spec`, loading the persisted collection.
    ///
    /// Load failures degrade to an empty collection by design: a corrupt
    /// blob must never make the dashboard unusable.
    pub fn open(kv: S, spec: &'static KindSpec) -> Self {
        let items = load_collection(&kv, spec);
        Self { kv, spec, items }
    }

    pub fn kind(&self) -> EntityKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static KindSpec {
        self.spec
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a defensive copy of the collection in insertion order.
    pub fn all(&self) -> Vec<Record> {
        self.items.clone()
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.items.iter().find(|record| record.id == id)
    }

    /// Creates a record from `fields`, overlaying the kind defaults.
    ///
    /// Assigns a fresh id and creation timestamp, appends, persists and
    /// returns the stored record.
    pub fn add(&mut self, fields: FieldMap) -> StoreResult<Record> {
        let mut merged = self.spec.default_fields();
        merged.extend(fields);

        let record = Record::new(merged);
        self.items.push(record.clone());
        self.persist()?;

        info!(
            "event=record_added module=store kind={} id={}",
            self.spec.kind.label(),
            record.id
        );
        Ok(record)
    }

    /// Shallow-merges `fields` into the record with the given id.
    ///
    /// Fields absent from `fields` are retained; `id` and `created_at` are
    /// never touched. Returns `StoreError::NotFound` when the id is absent,
    /// leaving the collection unchanged.
    pub fn update(&mut self, id: RecordId, fields: FieldMap) -> StoreResult<Record> {
        let Some(record) = self.items.iter_mut().find(|record| record.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        record.fields.extend(fields);
        let updated = record.clone();
        self.persist()?;

        info!(
            "event=record_updated module=store kind={} id={id}",
            self.spec.kind.label()
        );
        Ok(updated)
    }

    /// Removes the record with the given id; absent ids are a no-op.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        let before = self.items.len();
        self.items.retain(|record| record.id != id);
        if self.items.len() == before {
            return Ok(());
        }

        self.persist()?;
        info!(
            "event=record_deleted module=store kind={} id={id}",
            self.spec.kind.label()
        );
        Ok(())
    }

    /// Flips the named boolean field on one record, via `update`.
    ///
    /// Absent or non-flag fields toggle from their default `false`.
    pub fn toggle_flag(&mut self, id: RecordId, field: &str) -> StoreResult<Record> {
        let current = self
            .get(id)
            .ok_or(StoreError::NotFound(id))?
            .flag(field);
        self.update(id, FieldMap::from([(field.to_string(), (!current).into())]))
    }

    fn persist(&mut self) -> StoreResult<()> {
        self.kv
            .put_json(self.spec.storage_key, &self.items)
            .map_err(StoreError::Storage)
    }
}

fn load_collection<S: KeyValueStore>(kv: &S, spec: &KindSpec) -> Vec<Record> {
    match kv.get_json::<Vec<Record>>(spec.storage_key) {
        Ok(Some(items)) => items,
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(
                "event=collection_load module=store status=recovered key={} error={err}",
                spec.storage_key
            );
            Vec::new()
        }
    }
}
