//! Catalog use-case services.
//!
//! # Responsibility
//! - Turn front-end intents into collection store calls.
//! - Keep front ends decoupled from storage and serialization details.

pub mod catalog_service;
