//! Persisted card collection.
//!
//! # Responsibility
//! - Own the authoritative in-memory card list for one session.
//! - Keep one durable key/value slot eventually consistent with it.
//!
//! # Invariants
//! - `load()` runs once, before any mutation is accepted.
//! - `load()` never writes the slot.
//! - An empty collection is never written; the slot keeps its last value.
//! - Insertion order is preserved: add appends, update replaces in place,
//!   delete removes in place.
//! - A mutation whose write fails leaves the in-memory collection unchanged.

use crate::model::card::{Card, CardId, CardValidationError};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default slot key used by the catalog.
pub const DEFAULT_STORAGE_KEY: &str = "paniniCards";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for collection store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A mutation was attempted before the initial load.
    NotLoaded,
    Storage(StorageError),
    Serialize(serde_json::Error),
    Validation(CardValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "collection must be loaded before it is modified"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotLoaded => None,
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CardValidationError> for StoreError {
    fn from(value: CardValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of the startup load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot held a card array; `count` cards were accepted into memory.
    Hydrated { count: usize },
    /// The slot was never written (or is blank).
    Absent,
    /// The slot did not hold a card array; prior state kept.
    Malformed,
    /// `load()` already ran for this store.
    AlreadyLoaded,
}

/// Card collection bound to one storage slot.
pub struct CollectionStore<S: KeyValueStore> {
    storage: S,
    key: String,
    cards: Vec<Card>,
    loaded: bool,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Creates an empty, not yet loaded store.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            cards: Vec::new(),
            loaded: false,
        }
    }

    /// Creates a store and performs the startup load.
    pub fn open(storage: S, key: impl Into<String>) -> StoreResult<Self> {
        let mut store = Self::new(storage, key);
        store.load()?;
        Ok(store)
    }

    /// Hydrates the collection from the slot.
    ///
    /// Any parseable card array replaces the in-memory collection; single
    /// invalid or duplicate cards are dropped with a warning. A payload that
    /// is not a card array is logged and treated as absent, keeping the prior
    /// in-memory value. Only storage read failures are returned as errors.
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        if self.loaded {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let raw = self.storage.get(&self.key)?;
        self.loaded = true;

        let outcome = match raw.as_deref().map(str::trim) {
            None | Some("") => LoadOutcome::Absent,
            Some(payload) => match parse_collection(payload) {
                Ok(cards) => {
                    let count = cards.len();
                    self.cards = cards;
                    LoadOutcome::Hydrated { count }
                }
                Err(reason) => {
                    error!(
                        "event=collection_load module=store status=error key={} error={}",
                        self.key, reason
                    );
                    LoadOutcome::Malformed
                }
            },
        };

        info!(
            "event=collection_load module=store status=done key={} outcome={:?} count={}",
            self.key,
            outcome,
            self.cards.len()
        );
        Ok(outcome)
    }

    /// Appends `card` to the end of the collection and persists it.
    ///
    /// The caller provides a fresh id; uniqueness is not re-checked here.
    pub fn add(&mut self, card: Card) -> StoreResult<()> {
        self.ensure_loaded()?;
        card.validate()?;
        debug!(
            "event=card_add module=store status=ok card_id={} position={}",
            card.id,
            self.cards.len()
        );
        self.cards.push(card);
        if let Err(err) = self.persist() {
            self.cards.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Replaces the entry with the same id, keeping its position.
    ///
    /// Returns `false` and leaves the collection untouched when no entry
    /// matches.
    pub fn update(&mut self, card: Card) -> StoreResult<bool> {
        self.ensure_loaded()?;
        card.validate()?;
        let Some(index) = self.cards.iter().position(|entry| entry.id == card.id) else {
            debug!(
                "event=card_update module=store status=skipped reason=unknown_id card_id={}",
                card.id
            );
            return Ok(false);
        };

        let previous = std::mem::replace(&mut self.cards[index], card);
        if let Err(err) = self.persist() {
            self.cards[index] = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Removes the entry with `id`, if present.
    ///
    /// Returns `false` when nothing matched.
    pub fn delete(&mut self, id: &CardId) -> StoreResult<bool> {
        self.ensure_loaded()?;
        let Some(index) = self.cards.iter().position(|entry| &entry.id == id) else {
            debug!(
                "event=card_delete module=store status=skipped reason=unknown_id card_id={}",
                id
            );
            return Ok(false);
        };

        let removed = self.cards.remove(index);
        if let Err(err) = self.persist() {
            self.cards.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    /// Current collection in insertion order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|entry| &entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn ensure_loaded(&self) -> StoreResult<()> {
        if !self.loaded {
            return Err(StoreError::NotLoaded);
        }
        Ok(())
    }

    fn persist(&self) -> StoreResult<()> {
        if self.cards.is_empty() {
            debug!(
                "event=collection_save module=store status=skipped reason=empty key={}",
                self.key
            );
            return Ok(());
        }

        let payload = serde_json::to_string(&self.cards).map_err(StoreError::Serialize)?;
        self.storage.set(&self.key, &payload)?;
        debug!(
            "event=collection_save module=store status=ok key={} count={}",
            self.key,
            self.cards.len()
        );
        Ok(())
    }
}

/// Parses a stored collection payload.
///
/// Only JSON that is not an array of card objects is rejected. Cards that
/// fail the stored-data check, and repeats of an id already seen, are
/// dropped one by one so the rest of the collection survives. Errors and
/// warnings carry metadata only; card text never leaves here.
fn parse_collection(payload: &str) -> Result<Vec<Card>, String> {
    let stored: Vec<Card> = serde_json::from_str(payload).map_err(|err| {
        format!(
            "invalid json at line {} column {} ({:?})",
            err.line(),
            err.column(),
            err.classify()
        )
    })?;

    let mut seen = HashSet::with_capacity(stored.len());
    let mut cards = Vec::with_capacity(stored.len());
    for (index, card) in stored.into_iter().enumerate() {
        if let Err(err) = card.validate_stored() {
            warn!(
                "event=card_dropped module=store status=invalid index={} error={}",
                index, err
            );
            continue;
        }
        if !seen.insert(card.id.clone()) {
            warn!(
                "event=card_dropped module=store status=duplicate_id index={} card_id={}",
                index, card.id
            );
            continue;
        }
        cards.push(card);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::parse_collection;

    #[test]
    fn parse_collection_rejects_non_array_payload() {
        let err = parse_collection(r#"{"id":"1"}"#).unwrap_err();
        assert!(err.contains("invalid json"));
    }

    #[test]
    fn parse_collection_accepts_empty_array() {
        assert!(parse_collection("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_collection_keeps_first_of_duplicate_ids() {
        let card = r#"{"id":"1","bandName":"b","style":"s","influentialAlbum":"a","countryOfOrigin":"c","yearsActive":"y","imageUrl":"i"}"#;
        let other = r#"{"id":"1","bandName":"other","style":"s","influentialAlbum":"a","countryOfOrigin":"c","yearsActive":"y","imageUrl":"i"}"#;
        let cards = parse_collection(&format!("[{card},{other}]")).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].band_name, "b");
    }
}
