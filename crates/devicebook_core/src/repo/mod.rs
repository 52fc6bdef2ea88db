//! Repository layer over the byte-store.
//!
//! # Responsibility
//! - Define the record store contract used by the facade.
//! - Keep blob encoding and byte-store details out of the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`AlreadyExists`, `NotFound`)
//!   separately from persistence failures.

pub mod record_repo;
