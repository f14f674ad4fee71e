//! In-memory blob store.

use crate::domain::error::Result;
use crate::storage::backend::BlobStore;
use std::collections::HashMap;

/// [`BlobStore`] backed by a `HashMap`.
///
/// Keeps a count of writes so callers can check whether an operation persisted
/// anything.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryBlobStore {
    /// Number of successful `set` calls so far.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
