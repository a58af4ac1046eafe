//! Card editing form.
//!
//! # Responsibility
//! - Hold the create/edit draft state raised by a front end.
//! - Validate drafts into cards before any store intent is emitted.
//!
//! # Invariants
//! - A failed validation produces exactly one user-facing message.

pub mod card_form;
