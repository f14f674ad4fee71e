//! File-based blob store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling file first
//! and are then renamed over the target, so a crash mid-write never leaves a
//! truncated document behind.

use crate::domain::error::{Result, ShelfmarkError};
use crate::storage::backend::BlobStore;
use std::path::{Path, PathBuf};

/// Directory-backed [`BlobStore`].
///
/// # Thread Safety
///
/// This type is `Send` but performs no locking. Two processes writing the same key
/// will clobber each other; the last rename wins.
///
/// # Examples
///
/// ```no_run
/// use shelfmark::storage::{BlobStore, FileBlobStore};
/// use std::path::PathBuf;
///
/// let mut store = FileBlobStore::new(PathBuf::from("/tmp/shelfmark"))?;
/// store.set("bookshelf_library", r#"{"toRead":[],"reading":[],"finished":[]}"#)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing file blob store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file backing `key`.
    ///
    /// Keys are restricted to ASCII alphanumerics, `-` and `_` so they can never
    /// escape the store directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ShelfmarkError::Storage(format!("invalid key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("file_blob_get", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "document loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no document stored");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("file_blob_set", path = ?path, bytes = value.len())
            .entered();

        let tmp_path = path.with_extension("json.tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("document saved");
        Ok(())
    }
}
