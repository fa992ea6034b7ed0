//! Presentation ordering policy.
//!
//! # Responsibility
//! - Apply the one ordering rule defined for tasks; leave other kinds in
//!   store insertion order.
//!
//! # Invariants
//! - Tasks order: incomplete before complete; among equal completion,
//!   earlier deadline first and deadline-less tasks last; ties broken by
//!   creation time ascending.

use crate::model::kind::{field, EntityKind, KindSpec};
use crate::model::record::Record;
use std::cmp::Ordering;

/// Orders `records` in place for display under the given kind.
pub fn order_for_display(spec: &KindSpec, records: &mut [Record]) {
    if spec.kind == EntityKind::Task {
        records.sort_by(compare_tasks);
    }
}

fn compare_tasks(a: &Record, b: &Record) -> Ordering {
    a.flag(field::COMPLETED)
        .cmp(&b.flag(field::COMPLETED))
        .then_with(|| compare_deadlines(deadline_of(a), deadline_of(b)))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

fn deadline_of(record: &Record) -> Option<&str> {
    let value = record.text(field::DEADLINE);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn compare_deadlines(a: Option<&str>, b: Option<&str>) -> Ordering {
    // ISO dates compare correctly as strings; absent deadlines sort last.
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
