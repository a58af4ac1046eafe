//! Core logic for the punk band trading card catalog.
//! This crate owns the card model, the persisted collection and its invariants.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{CatalogConfig, ConfigError, ConfigOverrides};
pub use form::card_form::{CardForm, FormError, SongDraft};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{is_valid_embed_url, Card, CardField, CardId, CardValidationError, Song};
pub use service::catalog_service::{CatalogError, CatalogService, Submitted};
pub use storage::memory::MemoryKeyValueStore;
pub use storage::sqlite_slots::SqliteSlotStore;
pub use storage::{KeyValueStore, StorageError, StorageResult};
pub use store::collection_store::{
    CollectionStore, LoadOutcome, StoreError, StoreResult, DEFAULT_STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
