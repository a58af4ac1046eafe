//! In-memory slot storage for ephemeral sessions and tests.

use super::{validate_key, KeyValueStore, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Process-local key/value area. Not shared across threads.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: RefCell<BTreeMap<String, String>>,
    writes: Cell<u64>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-populated slot.
    ///
    /// Seeding does not count as a write.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Number of successful `set` calls since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
