//! Key-value storage adapter and SQLite bootstrap.
//!
//! # Responsibility
//! - Persist JSON-serializable values under string keys, synchronously.
//! - Open and migrate the backing SQLite store before any data access.
//!
//! # Invariants
//! - Each entity collection owns exactly one key; writes replace the whole
//!   value under that key.
//! - Schema version is tracked via `PRAGMA user_version`; application data is
//!   never touched before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod migrations;
mod open;

pub use open::{open_store, open_store_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for bootstrap, key-value access and JSON codec.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        store_version: u32,
        latest_supported: u32,
    },
    MissingRequiredTable(&'static str),
    /// Persisted value under `key` is not valid JSON for the requested type.
    Decode {
        key: String,
        message: String,
    },
    /// Value could not be serialized before the write.
    Encode {
        key: String,
        message: String,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                store_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {store_version} is newer than supported {latest_supported}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage table `{table}` is missing")
            }
            Self::Decode { key, message } => {
                write!(f, "corrupt value under key `{key}`: {message}")
            }
            Self::Encode { key, message } => {
                write!(f, "cannot encode value for key `{key}`: {message}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
