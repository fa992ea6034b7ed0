//! Entity store layer.
//!
//! # Responsibility
//! - Provide the generic CRUD container owning one entity collection.
//! - Map storage failures into store-level semantics (fail-soft loads,
//!   `NotFound` on absent ids).
//!
//! # Invariants
//! - Each store owns a disjoint storage key; stores never share state.
//! - Every mutation persists the whole collection synchronously.

use crate::model::record::RecordId;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entity_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for CRUD operations.
#[derive(Debug)]
pub enum StoreError {
    /// Target record id is absent from the collection.
    NotFound(RecordId),
    /// Persistence-layer failure.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
