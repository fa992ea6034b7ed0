//! List presentation layer.
//!
//! # Responsibility
//! - Turn filtered collections into display-surface content, one view per
//!   entity kind.
//! - Apply the presentation ordering policy.
//!
//! # Invariants
//! - Rendering fully replaces the target surface content.
//! - An empty filtered result renders a designated placeholder, never a
//!   blank list.

pub mod list;
pub mod order;
pub mod surface;
