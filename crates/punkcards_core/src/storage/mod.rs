//! Key/value slot storage.
//!
//! # Responsibility
//! - Define the read/write-by-key capability injected into the collection store.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Keys are non-empty after trimming.
//! - `set` fully replaces the previous value of a slot.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite_slots;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for slot read/write operations.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidKey(String),
    MissingSchema(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::MissingSchema(table) => write!(f, "storage table `{table}` is missing"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::MissingSchema(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed storage area holding serialized slots.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the slot was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` into the slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
