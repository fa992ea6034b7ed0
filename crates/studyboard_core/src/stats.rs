//! Dashboard statistics aggregation.
//!
//! # Responsibility
//! - Recompute the four dashboard counts from the three entity stores.
//! - Publish them to a display surface.
//!
//! # Invariants
//! - No stored state: every snapshot is computed from scratch over `all()`.
//! - Consistency is caller-driven; frontends collect after every mutation.

use crate::model::kind::field;
use crate::render::surface::Surface;
use crate::storage::kv::KeyValueStore;
use crate::store::entity_store::EntityStore;
use std::fmt::{Display, Formatter};

/// Point-in-time dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_notes: usize,
    pub total_schedules: usize,
}

impl StatsSnapshot {
    /// Computes a fresh snapshot over the three stores.
    pub fn collect<S: KeyValueStore>(
        schedules: &EntityStore<S>,
        tasks: &EntityStore<S>,
        notes: &EntityStore<S>,
    ) -> Self {
        let task_records = tasks.all();
        Self {
            total_tasks: task_records.len(),
            completed_tasks: task_records
                .iter()
                .filter(|record| record.flag(field::COMPLETED))
                .count(),
            total_notes: notes.len(),
            total_schedules: schedules.len(),
        }
    }

    /// Writes the formatted counts to `surface`, replacing its content.
    pub fn publish(&self, surface: &mut dyn Surface) {
        surface.replace_content(&self.to_string());
    }
}

impl Display for StatsSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tasks: {} ({} completed) | notes: {} | schedules: {}",
            self.total_tasks, self.completed_tasks, self.total_notes, self.total_schedules
        )
    }
}
