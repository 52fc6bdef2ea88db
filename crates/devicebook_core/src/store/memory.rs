//! Process-local byte-store.

use super::{ByteStore, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory byte-store for tests and ephemeral sessions.
///
/// Single-threaded by construction (`RefCell`), matching the single-writer
/// model of the record store.
#[derive(Debug, Default)]
pub struct MemoryByteStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many keys currently hold a value.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ByteStore for MemoryByteStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryByteStore;
    use crate::store::ByteStore;

    #[test]
    fn unknown_key_loads_as_none() {
        let store = MemoryByteStore::new();
        assert_eq!(store.load("missing").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn store_replaces_previous_value() {
        let store = MemoryByteStore::new();
        store.store("k", b"first").unwrap();
        store.store("k", b"second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(store.len(), 1);
    }
}
