//! Core record storage for devicebook.
//! Owns the serial-id uniqueness rules and the persisted record blob.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{load_from_file, AppConfig, ConfigError, LogLevel};
pub use logging::{flush_logging, init_logging, logging_status};
pub use model::record::{Record, RecordId, RecordMap};
pub use repo::record_repo::{
    BlobRecordRepository, PersistenceError, RecordRepository, RepoError, RepoResult,
    DEFAULT_STORAGE_KEY,
};
pub use service::storage_facade::{RecordStorage, StorageFacade};
pub use store::{ByteStore, MemoryByteStore, SqliteByteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
