//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist named slots in the `kv_slots` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - One row per key; writes are upserts.
//! - The connection must have migrations applied (see `db::open_db`).

use super::{validate_key, KeyValueStore, StorageError, StorageResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const SLOT_TABLE: &str = "kv_slots";

/// Slot storage borrowing an open, migrated connection.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps `conn` after checking the slot table exists.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [SLOT_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StorageError::MissingSchema(SLOT_TABLE));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteSlotStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=slot_write module=storage status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}
