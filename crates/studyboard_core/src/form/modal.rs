//! Modal form controller and field validation.
//!
//! # Responsibility
//! - Track the Closed -> Open(create|edit) -> Submitted/Cancelled -> Closed
//!   lifecycle of the single modal instance.
//! - Validate required fields and time/date formats; rejected submissions
//!   keep the modal open for re-prompting.
//!
//! # Invariants
//! - At most one form is open; opening replaces any open form, and the
//!   replaced form's target can no longer be submitted.
//! - A failed validation never reaches the store: `submit` returns the
//!   validated values only on success.

use crate::model::kind::{EntityKind, KindSpec};
use crate::model::record::{FieldMap, Record, RecordId};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("valid date regex")
});

/// Validation error reported in place on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// `submit` was called with no open form.
    NotOpen,
    /// A required field is empty or missing.
    MissingField { field: &'static str },
    /// A time field is present but not `HH:MM`.
    InvalidTime {
        field: &'static str,
        value: String,
    },
    /// A date field is present but not `YYYY-MM-DD`.
    InvalidDate {
        field: &'static str,
        value: String,
    },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "no form is open"),
            Self::MissingField { field } => write!(f, "field `{field}` must not be empty"),
            Self::InvalidTime { field, value } => {
                write!(f, "field `{field}` must be HH:MM, got `{value}`")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "field `{field}` must be YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for FormError {}

/// Snapshot of the open form presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenForm {
    pub kind: EntityKind,
    /// `None` for create, `Some(id)` for edit.
    pub target: Option<RecordId>,
    /// Seed values: kind defaults for create, current fields for edit.
    pub values: FieldMap,
}

/// Modal lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(OpenForm),
}

/// Validated submission handed to the owning entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub kind: EntityKind,
    /// `None` requests `add`, `Some(id)` requests `update`.
    pub target: Option<RecordId>,
    pub values: FieldMap,
}

/// The single modal instance shared by all three kinds.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::Closed
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Opens a create form seeded with the kind defaults.
    ///
    /// Replaces any form that is already open.
    pub fn open_create(&mut self, kind: EntityKind) -> &OpenForm {
        self.open(OpenForm {
            kind,
            target: None,
            values: kind.spec().default_fields(),
        })
    }

    /// Opens an edit form seeded with the record's current field values.
    pub fn open_edit(&mut self, kind: EntityKind, record: &Record) -> &OpenForm {
        self.open(OpenForm {
            kind,
            target: Some(record.id),
            values: record.fields.clone(),
        })
    }

    /// Closes the form without submitting.
    pub fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Validates `values` against the open form's kind and closes on success.
    ///
    /// On validation failure the form stays open so the frontend can
    /// re-prompt; the values are never handed to a store.
    pub fn submit(&mut self, values: FieldMap) -> Result<FormSubmission, FormError> {
        let ModalState::Open(form) = &self.state else {
            return Err(FormError::NotOpen);
        };

        validate_fields(form.kind.spec(), &values)?;

        let submission = FormSubmission {
            kind: form.kind,
            target: form.target,
            values,
        };
        self.state = ModalState::Closed;
        Ok(submission)
    }

    fn open(&mut self, form: OpenForm) -> &OpenForm {
        if let ModalState::Open(previous) = &self.state {
            debug!(
                "event=modal_replaced module=form kind={} target={:?}",
                previous.kind.label(),
                previous.target
            );
        }
        self.state = ModalState::Open(form);
        match &self.state {
            ModalState::Open(form) => form,
            ModalState::Closed => unreachable!("state was just set to Open"),
        }
    }
}

/// Checks required non-emptiness and time/date formats for one kind.
pub fn validate_fields(spec: &KindSpec, values: &FieldMap) -> Result<(), FormError> {
    for name in spec.required {
        let present = values
            .get(*name)
            .map(|value| match value {
                // A flag is always a concrete value; only text can be blank.
                crate::model::record::FieldValue::Flag(_) => true,
                crate::model::record::FieldValue::Text(text) => !text.trim().is_empty(),
            })
            .unwrap_or(false);
        if !present {
            return Err(FormError::MissingField { field: name });
        }
    }

    for name in spec.time_fields {
        if let Some(value) = non_empty_text(values, name) {
            if !TIME_RE.is_match(value) {
                return Err(FormError::InvalidTime {
                    field: name,
                    value: value.to_string(),
                });
            }
        }
    }

    for name in spec.date_fields {
        if let Some(value) = non_empty_text(values, name) {
            if !DATE_RE.is_match(value) {
                return Err(FormError::InvalidDate {
                    field: name,
                    value: value.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn non_empty_text<'v>(values: &'v FieldMap, name: &str) -> Option<&'v str> {
    values
        .get(name)
        .and_then(|value| value.as_text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
