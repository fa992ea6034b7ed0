//! List filtering and search-input scheduling.
//!
//! # Responsibility
//! - Provide substring filtering over each kind's searchable fields.
//! - Model debounced search input as an explicit cancellable scheduled task.

pub mod debounce;
pub mod filter;
