//! SQLite-backed byte-store.
//!
//! # Invariants
//! - One row per key in `kv_blobs`; writes are upserts.
//! - The connection must come from `db::open_db*` so the table exists.

use super::{ByteStore, StoreError, StoreResult};
use crate::db::migrations::latest_version;
use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Durable byte-store over a bootstrapped SQLite connection.
pub struct SqliteByteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteByteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps `conn` after checking its schema is the one this build writes.
    ///
    /// Guards against connections that bypassed `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected = latest_version();
        if db_version != expected {
            return Err(StoreError::Db(DbError::SchemaMismatch {
                db_version,
                expected,
            }));
        }
        Ok(Self::new(conn))
    }
}

impl ByteStore for SqliteByteStore<'_> {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn store(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, bytes],
        )?;
        debug!(
            "event=blob_store module=store status=ok backend=sqlite key={key} bytes={}",
            bytes.len()
        );
        Ok(())
    }
}
