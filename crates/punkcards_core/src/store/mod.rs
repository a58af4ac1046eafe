//! Session state backed by durable slots.
//!
//! # Responsibility
//! - Hold the in-memory card collection and sync it to storage.
//!
//! # Invariants
//! - The store is the only reader and writer of its slot in a process.

pub mod collection_store;
