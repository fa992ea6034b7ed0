//! Substring filtering over searchable fields.
//!
//! # Responsibility
//! - Match records against a query using case-insensitive substring
//!   semantics over the kind's searchable field subset.
//!
//! # Invariants
//! - A blank query matches every record.
//! - Filtering preserves input order and is idempotent.

use crate::model::kind::KindSpec;
use crate::model::record::Record;

/// Returns whether `record` matches `query` for the given kind.
///
/// The query is trimmed and lowercased; a blank query matches everything.
/// Only the descriptor's searchable text fields participate.
pub fn matches(record: &Record, spec: &KindSpec, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    spec.searchable
        .iter()
        .any(|name| record.text(name).to_lowercase().contains(&needle))
}

/// Retains the records matching `query`, preserving input order.
pub fn filter_records(records: &[Record], spec: &KindSpec, query: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| matches(record, spec, query))
        .cloned()
        .collect()
}
