//! Storage facade for presentation-layer callers.
//!
//! # Responsibility
//! - Expose the five record operations callers depend on.
//! - Delegate persistence to an injected `RecordRepository`.
//!
//! # Invariants
//! - `exists` compares both `id` and `label`; `save` and `delete` key on
//!   `id` only. The two rules are intentionally kept distinct.
//! - The facade holds no state besides its repository.

use crate::model::record::Record;
use crate::repo::record_repo::{RecordRepository, RepoResult};
use std::collections::HashSet;

/// Caller-facing record storage contract.
pub trait RecordStorage {
    fn get_all(&self) -> HashSet<Record>;
    fn find_by_id(&self, id: &str) -> Option<Record>;
    fn save(&self, record: &Record) -> RepoResult<Record>;
    fn delete(&self, record: &Record) -> RepoResult<()>;
    fn exists(&self, record: &Record) -> bool;
}

/// Facade translating storage calls into record repository operations.
pub struct StorageFacade<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> StorageFacade<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}

impl<R: RecordRepository> RecordStorage for StorageFacade<R> {
    /// Returns every stored record as an unordered set.
    fn get_all(&self) -> HashSet<Record> {
        self.repo.fetch_all().into_values().collect()
    }

    /// Scans stored values for the record with `id`.
    fn find_by_id(&self, id: &str) -> Option<Record> {
        self.repo
            .fetch_all()
            .into_values()
            .find(|record| record.id == id)
    }

    fn save(&self, record: &Record) -> RepoResult<Record> {
        self.repo.save(record)
    }

    /// Deletes by `record.id`; a differing `label` does not block removal.
    fn delete(&self, record: &Record) -> RepoResult<()> {
        self.repo.delete(record).map(|_| ())
    }

    /// Returns whether a record equal in both `id` and `label` is stored.
    fn exists(&self, record: &Record) -> bool {
        self.repo.fetch_all().values().any(|stored| stored == record)
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStorage, StorageFacade};
    use crate::model::record::Record;
    use crate::repo::record_repo::BlobRecordRepository;
    use crate::store::MemoryByteStore;

    #[test]
    fn find_by_id_ignores_label() {
        let facade = StorageFacade::new(BlobRecordRepository::new(MemoryByteStore::new()));
        facade.save(&Record::new("IMEI1", "Model X")).unwrap();

        assert_eq!(
            facade.find_by_id("IMEI1"),
            Some(Record::new("IMEI1", "Model X"))
        );
        assert_eq!(facade.find_by_id("IMEI2"), None);
        assert_eq!(facade.repository().storage_key(), "mobiles");
    }
}
