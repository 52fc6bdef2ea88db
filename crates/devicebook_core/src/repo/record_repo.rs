//! Record store over a single persisted blob.
//!
//! # Responsibility
//! - Own the `id -> Record` mapping and its persistence under one key.
//! - Enforce id uniqueness on save and id existence on delete.
//!
//! # Invariants
//! - The mapping is loaded fresh on every call; nothing is cached.
//! - Mutations rewrite the full mapping; a rejected mutation writes nothing.
//! - Reads never fail: missing or undecodable blobs read as empty.
//!
//! # See also
//! - `store::ByteStore` for the persistence seam.

use crate::logging::log_field;
use crate::model::record::{Record, RecordId, RecordMap};
use crate::store::{ByteStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Byte-store key holding the record blob unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "mobiles";

pub type RepoResult<T> = Result<T, RepoError>;

/// Caller-visible record store failure.
#[derive(Debug)]
pub enum RepoError {
    AlreadyExists(RecordId),
    NotFound(RecordId),
    PersistenceFailure(PersistenceError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(id) => write!(f, "record already exists: {id}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::PersistenceFailure(err) => write!(f, "persistence failure: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyExists(_) | Self::NotFound(_) => None,
            Self::PersistenceFailure(err) => Some(err),
        }
    }
}

impl From<PersistenceError> for RepoError {
    fn from(value: PersistenceError) -> Self {
        Self::PersistenceFailure(value)
    }
}

/// Internal failure while reading or writing the blob on a mutation path.
#[derive(Debug)]
pub enum PersistenceError {
    Encode(serde_json::Error),
    Load(StoreError),
    Store(StoreError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode records: {err}"),
            Self::Load(err) => write!(f, "failed to load records: {err}"),
            Self::Store(err) => write!(f, "failed to store records: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Load(err) | Self::Store(err) => Some(err),
        }
    }
}

/// Repository interface for the record mapping.
pub trait RecordRepository {
    /// Returns the whole mapping; never fails.
    fn fetch_all(&self) -> RecordMap;
    /// Inserts `record` unless its `id` is already stored.
    fn save(&self, record: &Record) -> RepoResult<Record>;
    /// Removes the entry keyed by `record.id`, ignoring `record.label`.
    ///
    /// Returns the record as it was stored.
    fn delete(&self, record: &Record) -> RepoResult<Record>;
}

/// Record repository persisting the mapping as one JSON blob.
pub struct BlobRecordRepository<B: ByteStore> {
    store: B,
    key: String,
}

impl<B: ByteStore> BlobRecordRepository<B> {
    /// Creates a repository over `store` using `DEFAULT_STORAGE_KEY`.
    pub fn new(store: B) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: B, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Loads the mapping for a read-modify-write cycle.
    ///
    /// Corrupt data still reads as empty, but a byte-store transport error is
    /// returned so a failed read cannot lead to a full overwrite.
    fn load_for_write(&self) -> Result<RecordMap, PersistenceError> {
        let bytes = self.store.load(&self.key).map_err(PersistenceError::Load)?;
        Ok(bytes.map_or_else(RecordMap::new, |bytes| self.decode_or_empty(&bytes)))
    }

    fn persist(&self, records: &RecordMap) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(records).map_err(PersistenceError::Encode)?;
        self.store
            .store(&self.key, &bytes)
            .map_err(PersistenceError::Store)
    }

    fn decode_or_empty(&self, bytes: &[u8]) -> RecordMap {
        match decode_records(bytes) {
            Ok(records) => records,
            Err(reason) => {
                warn!(
                    "event=records_decode module=repo status=error key={} bytes={} action=treat_as_empty error={}",
                    self.key,
                    bytes.len(),
                    reason
                );
                RecordMap::new()
            }
        }
    }
}

impl<B: ByteStore> RecordRepository for BlobRecordRepository<B> {
    fn fetch_all(&self) -> RecordMap {
        match self.store.load(&self.key) {
            Ok(Some(bytes)) => self.decode_or_empty(&bytes),
            Ok(None) => RecordMap::new(),
            Err(err) => {
                error!(
                    "event=records_load module=repo status=error key={} action=treat_as_empty error={}",
                    self.key, err
                );
                RecordMap::new()
            }
        }
    }

    fn save(&self, record: &Record) -> RepoResult<Record> {
        let mut records = self.load_for_write()?;
        if records.contains_key(&record.id) {
            info!(
                "event=record_save module=repo status=rejected reason=already_exists id={}",
                log_field(&record.id)
            );
            return Err(RepoError::AlreadyExists(record.id.clone()));
        }

        records.insert(record.id.clone(), record.clone());
        if let Err(err) = self.persist(&records) {
            error!(
                "event=record_save module=repo status=error id={} error={}",
                log_field(&record.id),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=record_save module=repo status=ok id={} total={}",
            log_field(&record.id),
            records.len()
        );
        Ok(record.clone())
    }

    fn delete(&self, record: &Record) -> RepoResult<Record> {
        let mut records = self.load_for_write()?;
        let Some(removed) = records.remove(&record.id) else {
            info!(
                "event=record_delete module=repo status=rejected reason=not_found id={}",
                log_field(&record.id)
            );
            return Err(RepoError::NotFound(record.id.clone()));
        };

        if let Err(err) = self.persist(&records) {
            error!(
                "event=record_delete module=repo status=error id={} error={}",
                log_field(&record.id),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=record_delete module=repo status=ok id={} total={}",
            log_field(&record.id),
            records.len()
        );
        Ok(removed)
    }
}

/// Decodes a blob, rejecting entries whose `id` disagrees with their key.
fn decode_records(bytes: &[u8]) -> Result<RecordMap, String> {
    let records: RecordMap = serde_json::from_slice(bytes).map_err(|err| err.to_string())?;
    if let Some((key, record)) = records.iter().find(|(key, record)| **key != record.id) {
        return Err(format!(
            "entry key `{key}` does not match record id `{}`",
            record.id
        ));
    }
    Ok(records)
}
