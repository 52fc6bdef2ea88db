//! SQLite bootstrap for the durable byte-store.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply byte-store schema steps before handing out a connection.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No blob is read or written before the schema is current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    SchemaMismatch {
        db_version: u32,
        expected: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "byte-store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SchemaMismatch {
                db_version,
                expected,
            } => write!(
                f,
                "byte-store schema version {db_version} does not match expected {expected}; open the database with `open_db`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
