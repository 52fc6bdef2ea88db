//! Domain model for registered devices.
//!
//! # Responsibility
//! - Define the canonical record persisted by the record store.
//!
//! # Invariants
//! - Every record is identified by its serial `id`; no two stored records
//!   share an `id`.

pub mod record;
