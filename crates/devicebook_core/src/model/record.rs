//! Device record model.
//!
//! # Responsibility
//! - Define the `{id, label}` value persisted in the record blob.
//! - Define the in-memory shape of the whole persisted mapping.
//!
//! # Invariants
//! - Equality and hashing consider both `id` and `label`.
//! - Within a `RecordMap`, every entry's `id` equals its key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Serial identifier (for example an IMEI) acting as the primary key.
pub type RecordId = String;

/// Whole persisted state: one entry per record, keyed by `Record::id`.
pub type RecordMap = BTreeMap<RecordId, Record>;

/// Immutable device record.
///
/// Field names are part of the persisted format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Unique serial identifier.
    pub id: RecordId,
    /// Free-form label, typically the device model name.
    pub label: String,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Returns whether `other` has the same identifier, ignoring `label`.
    pub fn same_id(&self, other: &Record) -> bool {
        self.id == other.id
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.id, self.label)
    }
}
