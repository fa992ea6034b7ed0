//! Key-value adapter contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide synchronous get/put of string values under string keys.
//! - Layer a JSON codec on top, so callers persist typed collections.
//!
//! # Invariants
//! - `put_raw` replaces the whole value under the key (no partial writes).
//! - Typed reads surface corrupt JSON as `StorageError::Decode`; they never
//!   return half-parsed data.

use crate::storage::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Synchronous key-value persistence contract.
///
/// Mirrors a browser-local-storage surface: one flat string namespace,
/// whole-value overwrite per write.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, if any.
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put_raw(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Reads and decodes the JSON value stored under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| StorageError::Decode {
                    key: key.to_string(),
                    message: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and stores it under `key`.
    fn put_json<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_string(value).map_err(|err| StorageError::Encode {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        self.put_raw(key, &encoded)
    }
}

/// SQLite-backed key-value store over the `kv` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Constructs an adapter from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        if !table_exists(conn, "kv")? {
            return Err(StorageError::MissingRequiredTable("kv"));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put_raw(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
