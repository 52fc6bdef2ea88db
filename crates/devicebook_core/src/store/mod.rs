//! Byte-store contract and implementations.
//!
//! # Responsibility
//! - Define the opaque `load`/`store` surface the record store persists through.
//! - Provide an in-process store and a durable SQLite store.
//!
//! # Invariants
//! - `store` replaces the whole value under a key; the last full write wins.
//! - `load` of a key never written returns `Ok(None)`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryByteStore;
pub use sqlite::SqliteByteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport failure raised by a byte-store backend.
#[derive(Debug)]
pub enum StoreError {
    /// Statement-level SQLite failure while reading or writing a blob.
    Sqlite(rusqlite::Error),
    /// The connection is not usable as a byte-store (for example its schema
    /// is not current).
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "byte-store query failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable key -> bytes persistence consumed by the record store.
pub trait ByteStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn store(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
}

impl<T: ByteStore + ?Sized> ByteStore for &T {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).load(key)
    }

    fn store(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).store(key, bytes)
    }
}
