//! Form and modal control.
//!
//! # Responsibility
//! - Model the single edit/create modal and its submission lifecycle.
//! - Validate collected field values against the kind descriptor before any
//!   store mutation happens.

pub mod modal;
