//! Domain model for the trading card collection.
//!
//! # Responsibility
//! - Define the canonical card record shared by store, form and CLI.
//! - Own the wire shape of the persisted collection slot.
//!
//! # Invariants
//! - Every card is identified by a stable, non-empty `CardId`.
//! - A card carries either a complete song or no song at all.

pub mod card;
