//! Blob store abstraction.
//!
//! This module defines the [`BlobStore`] trait: a key-value store holding one string
//! document per key. The library store keeps its whole state in a single key and
//! always reads and writes the complete document, so nothing richer is needed.

use crate::domain::error::Result;

/// Key-value persistence for whole documents.
///
/// Reads return `Ok(None)` for a key that was never written. Writes replace any
/// previous value; there is no merge and no locking, the last writer wins.
///
/// # Implementations
///
/// - [`FileBlobStore`](crate::storage::FileBlobStore): one JSON file per key
/// - [`MemoryBlobStore`](crate::storage::MemoryBlobStore): in-process map
///
/// # Examples
///
/// ```
/// use shelfmark::storage::{BlobStore, MemoryBlobStore};
///
/// let mut store = MemoryBlobStore::default();
/// assert_eq!(store.get("k")?, None);
/// store.set("k", "{}")?;
/// assert_eq!(store.get("k")?.as_deref(), Some("{}"));
/// # Ok::<(), shelfmark::ShelfmarkError>(())
/// ```
pub trait BlobStore: Send {
    /// Returns the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
