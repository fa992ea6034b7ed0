//! Generic record model.
//!
//! # Responsibility
//! - Provide one storage shape for all entity kinds: a stable id, a creation
//!   timestamp and a flat map of named string/boolean fields.
//! - Keep the serialized form identical to the persisted JSON layout
//!   (`id`/`createdAt` plus the flattened kind fields).
//!
//! # Invariants
//! - `id` is unique within its collection and never reused.
//! - `created_at` is immutable after creation.
//! - Unknown persisted fields are preserved in the field map, never rejected.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for every dashboard record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// Single field value inside a record.
///
/// The persisted JSON carries plain strings and booleans, so the enum is
/// untagged and round-trips without any wrapper object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag, e.g. task completion.
    Flag(bool),
    /// Free-form text, e.g. titles, descriptions, times.
    Text(String),
}

impl FieldValue {
    /// Returns the text content, or `None` for flag values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Flag(_) => None,
        }
    }

    /// Returns the flag content, or `None` for text values.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Map of named field values, as collected from a form or stored on disk.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Canonical persisted record for one schedule, task or note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable id assigned at creation.
    pub id: RecordId,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Kind-specific fields, flattened into the record object.
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Record {
    /// Creates a record with a fresh id and the current creation time.
    pub fn new(fields: FieldMap) -> Self {
        Self::with_id(Uuid::new_v4(), now_epoch_ms(), fields)
    }

    /// Creates a record with caller-provided identity.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: RecordId, created_at: i64, fields: FieldMap) -> Self {
        Self {
            id,
            created_at,
            fields,
        }
    }

    /// Returns the named text field, or `""` when absent or non-text.
    ///
    /// Missing fields are tolerated by design: previously persisted data is
    /// never validated against the current field set.
    pub fn text(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Returns the named flag field, or `false` when absent or non-flag.
    pub fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }
}

/// Returns the current time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::{FieldMap, FieldValue, Record};
    use uuid::Uuid;

    fn sample_fields() -> FieldMap {
        FieldMap::from([
            ("title".to_string(), FieldValue::from("Essay")),
            ("completed".to_string(), FieldValue::from(false)),
        ])
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let a = Record::new(sample_fields());
        let b = Record::new(sample_fields());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn field_accessors_default_on_missing_and_mistyped_fields() {
        let record = Record::new(sample_fields());
        assert_eq!(record.text("title"), "Essay");
        assert_eq!(record.text("missing"), "");
        assert_eq!(record.text("completed"), "");
        assert!(!record.flag("completed"));
        assert!(!record.flag("title"));
    }

    #[test]
    fn json_shape_flattens_fields_and_renames_created_at() {
        let id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
        let record = Record::with_id(id, 1_700_000_000_000, sample_fields());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "00000000-0000-4000-8000-000000000001");
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["title"], "Essay");
        assert_eq!(json["completed"], false);

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn unknown_persisted_fields_are_preserved() {
        let raw = r#"{
            "id": "00000000-0000-4000-8000-000000000002",
            "createdAt": 1,
            "title": "x",
            "legacyField": "kept"
        }"#;
        let record: Record = serde_json::from_str(raw).unwrap();
        assert_eq!(record.text("legacyField"), "kept");
    }
}
