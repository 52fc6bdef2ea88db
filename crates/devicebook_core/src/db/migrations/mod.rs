//! Schema registry for the byte-store table.
//!
//! # Responsibility
//! - Bring a fresh or older database up to the byte-store schema this build
//!   expects.
//! - Refuse databases written by a newer build.
//!
//! # Invariants
//! - Step versions are strictly increasing and mirrored to `PRAGMA user_version`.
//! - Steps only shape the `kv_blobs` table; blob contents stay opaque here.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_blobs",
    sql: include_str!("0001_kv_blobs.sql"),
}];

/// Returns the schema version written by this build.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Applies every step newer than the stored `user_version` in one transaction.
///
/// Returns how many steps were applied (`0` when already current).
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let stored: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > stored)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=schema_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(pending.len())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version};
    use rusqlite::Connection;

    #[test]
    fn second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(apply_migrations(&mut conn).unwrap(), latest_version() as usize);
        assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
    }
}
