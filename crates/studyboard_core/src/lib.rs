//! Core domain logic for StudyBoard, a local-first student dashboard.
//! This crate is the single source of truth for business invariants.

pub use rusqlite;

pub mod form;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod stats;
pub mod storage;
pub mod store;

pub use form::modal::{FormError, FormSubmission, ModalController, ModalState, OpenForm};
pub use logging::{default_log_level, init_logging};
pub use model::kind::{field, EntityKind, KindSpec, Priority};
pub use model::record::{FieldMap, FieldValue, Record, RecordId};
pub use render::list::ListView;
pub use render::surface::{Surface, TextSurface};
pub use search::debounce::{SearchDebouncer, DEFAULT_DEBOUNCE_WINDOW};
pub use search::filter::{filter_records, matches};
pub use stats::StatsSnapshot;
pub use storage::kv::{KeyValueStore, SqliteKvStore};
pub use storage::{open_store, open_store_in_memory, StorageError, StorageResult};
pub use store::entity_store::EntityStore;
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
