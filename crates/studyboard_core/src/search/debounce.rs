//! Debounced search input, modeled as a cancellable scheduled task.
//!
//! # Responsibility
//! - Delay a pending query until a quiet period elapses after the last
//!   keystroke, superseding any earlier pending query.
//!
//! # Invariants
//! - At most one query is pending per debouncer; scheduling replaces it.
//! - The final scheduled query always wins; superseded queries never fire.
//! - Purely deadline-driven: the caller supplies `Instant`s, no timers or
//!   threads are involved.

use std::time::{Duration, Instant};

/// Quiet window applied between the last keystroke and the re-render.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(180);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    query: String,
    due_at: Instant,
}

/// One debouncer per search input source.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<PendingQuery>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedules `query`, cancelling any still-pending query and re-arming
    /// the quiet-period deadline from `now`.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            due_at: now + self.window,
        });
    }

    /// Drops any pending query without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending query once its quiet period has elapsed.
    ///
    /// Returns `None` while nothing is pending or the deadline has not been
    /// reached yet.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref()?.due_at > now {
            return None;
        }
        self.pending.take().map(|pending| pending.query)
    }

    /// Takes the pending query immediately, e.g. on explicit submit.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.query)
    }
}
