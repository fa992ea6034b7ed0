//! Entity kinds and their static descriptors.
//!
//! # Responsibility
//! - Enumerate the three dashboard entity kinds.
//! - Describe each kind declaratively: storage key, form field order,
//!   required/searchable fields, defaults and format-checked fields.
//!
//! # Invariants
//! - One `KindSpec` exists per kind and is `'static`.
//! - Adding a kind must not require changes in store/filter/form code.

use crate::model::record::{FieldMap, FieldValue};
use serde::{Deserialize, Serialize};

/// Field names shared by descriptors, stores and frontends.
pub mod field {
    pub const DAY: &str = "day";
    pub const TIME: &str = "time";
    pub const SUBJECT: &str = "subject";
    pub const LOCATION: &str = "location";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PRIORITY: &str = "priority";
    pub const COMPLETED: &str = "completed";
    pub const DEADLINE: &str = "deadline";
    pub const CONTENT: &str = "content";
}

/// The three entity kinds managed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Weekly class schedule entry.
    Schedule,
    /// Actionable task with priority and completion flag.
    Task,
    /// Free-form note.
    Note,
}

impl EntityKind {
    /// Returns the static descriptor for this kind.
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Self::Schedule => &SCHEDULE_SPEC,
            Self::Task => &TASK_SPEC,
            Self::Note => &NOTE_SPEC,
        }
    }

    /// Human-readable singular label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Task => "task",
            Self::Note => "note",
        }
    }
}

/// Default value carried by a descriptor.
///
/// Kept as a separate const-constructible type because `FieldValue` owns a
/// `String` and cannot appear in a `const` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Flag(bool),
}

impl DefaultValue {
    /// Materializes the owned field value.
    pub fn to_field_value(self) -> FieldValue {
        match self {
            Self::Text(value) => FieldValue::Text(value.to_string()),
            Self::Flag(value) => FieldValue::Flag(value),
        }
    }
}

/// Declarative descriptor for one entity kind.
///
/// The generic store, filter and form layers are parameterized over this
/// data instead of per-kind subtypes, so there is exactly one CRUD
/// implementation for all three collections.
#[derive(Debug)]
pub struct KindSpec {
    pub kind: EntityKind,
    /// Storage-adapter key owning this kind's persisted JSON array.
    pub storage_key: &'static str,
    /// Field presentation order for forms.
    pub form_fields: &'static [&'static str],
    /// Fields that must be non-empty on form submission.
    pub required: &'static [&'static str],
    /// Fields matched by substring search.
    pub searchable: &'static [&'static str],
    /// Field defaults applied at creation and used to seed create forms.
    pub defaults: &'static [(&'static str, DefaultValue)],
    /// Fields that must match `HH:MM` when non-empty.
    pub time_fields: &'static [&'static str],
    /// Fields that must match `YYYY-MM-DD` when non-empty.
    pub date_fields: &'static [&'static str],
}

impl KindSpec {
    /// Materializes the default field map for create flows.
    pub fn default_fields(&self) -> FieldMap {
        self.defaults
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_field_value()))
            .collect()
    }
}

pub static SCHEDULE_SPEC: KindSpec = KindSpec {
    kind: EntityKind::Schedule,
    storage_key: "dashboard_schedules",
    form_fields: &[field::DAY, field::TIME, field::SUBJECT, field::LOCATION],
    required: &[field::DAY, field::TIME, field::SUBJECT, field::LOCATION],
    searchable: &[field::SUBJECT, field::LOCATION, field::DAY, field::TIME],
    defaults: &[
        (field::DAY, DefaultValue::Text("")),
        (field::TIME, DefaultValue::Text("")),
        (field::SUBJECT, DefaultValue::Text("")),
        (field::LOCATION, DefaultValue::Text("")),
    ],
    time_fields: &[field::TIME],
    date_fields: &[],
};

pub static TASK_SPEC: KindSpec = KindSpec {
    kind: EntityKind::Task,
    storage_key: "dashboard_tasks",
    form_fields: &[
        field::TITLE,
        field::DESCRIPTION,
        field::PRIORITY,
        field::DEADLINE,
    ],
    required: &[field::TITLE, field::DESCRIPTION],
    searchable: &[field::TITLE, field::DESCRIPTION, field::PRIORITY],
    defaults: &[
        (field::TITLE, DefaultValue::Text("")),
        (field::DESCRIPTION, DefaultValue::Text("")),
        (field::PRIORITY, DefaultValue::Text("low")),
        (field::DEADLINE, DefaultValue::Text("")),
        (field::COMPLETED, DefaultValue::Flag(false)),
    ],
    time_fields: &[],
    date_fields: &[field::DEADLINE],
};

pub static NOTE_SPEC: KindSpec = KindSpec {
    kind: EntityKind::Note,
    storage_key: "dashboard_notes",
    form_fields: &[field::TITLE, field::CONTENT],
    required: &[field::TITLE, field::CONTENT],
    searchable: &[field::TITLE, field::CONTENT],
    defaults: &[
        (field::TITLE, DefaultValue::Text("")),
        (field::CONTENT, DefaultValue::Text("")),
    ],
    time_fields: &[],
    date_fields: &[],
};

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parses the persisted lowercase value; unknown values fall back to
    /// `Low`, matching the defaulted-field tolerance policy.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Low,
        }
    }

    /// Persisted lowercase value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}
