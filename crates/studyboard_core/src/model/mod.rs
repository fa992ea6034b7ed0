//! Domain model for dashboard entities.
//!
//! # Responsibility
//! - Define the canonical record shape shared by schedules, tasks and notes.
//! - Define the static per-kind descriptors that drive the generic store,
//!   filtering and form validation.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId` assigned at creation.
//! - Kind-specific behavior lives in `KindSpec` data, not in per-kind types.

pub mod kind;
pub mod record;
