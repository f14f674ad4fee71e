//! Library store: shelf operations over a single persisted document.
//!
//! Every operation loads the whole [`Library`], mutates it in memory and writes the
//! whole document back. Operations that find nothing to change do not write at all.
//!
//! # Shelf transitions
//!
//! ```text
//! toRead ⇄ reading ──► finished
//!    └─────────────────────┘
//! ```
//!
//! `finished` is reached by an explicit move or by recording 100% progress. Moving a
//! book out of `finished` is only possible through [`LibraryStore::move_book`].

use crate::domain::book::{Book, Library, Shelf};
use crate::domain::error::{Result, ShelfmarkError};
use crate::storage::backend::BlobStore;

/// Key under which the library document is stored.
pub const LIBRARY_KEY: &str = "bookshelf_library";

/// Progress value that marks a book as finished.
pub const COMPLETE: u8 = 100;

/// Owns the three-shelf library and persists it through a [`BlobStore`].
///
/// # Examples
///
/// ```
/// use shelfmark::domain::{Book, Shelf};
/// use shelfmark::storage::{LibraryStore, MemoryBlobStore};
///
/// let mut store = LibraryStore::new(MemoryBlobStore::default());
/// store.add_book(Book::new("id-1", "Dune"), Shelf::Reading)?;
/// store.update_progress("id-1", 100, "loved it")?;
///
/// let library = store.load()?;
/// assert_eq!(library.finished[0].progress, 100);
/// # Ok::<(), shelfmark::ShelfmarkError>(())
/// ```
#[derive(Debug)]
pub struct LibraryStore<S> {
    backend: S,
}

impl<S: BlobStore> LibraryStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Borrows the underlying blob store.
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the persisted library.
    ///
    /// A missing document is the valid empty state and yields three empty shelves.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, or if a document exists but
    /// is not a valid library (it is never silently replaced).
    pub fn load(&self) -> Result<Library> {
        let _span = tracing::debug_span!("library_load").entered();

        let Some(contents) = self.backend.get(LIBRARY_KEY)? else {
            tracing::debug!("no library stored, starting empty");
            return Ok(Library::default());
        };

        let library: Library = serde_json::from_str(&contents)
            .map_err(|e| ShelfmarkError::Storage(format!("failed to parse library: {e}")))?;

        tracing::debug!(
            to_read = library.to_read.len(),
            reading = library.reading.len(),
            finished = library.finished.len(),
            "library loaded"
        );
        Ok(library)
    }

    /// Writes the full library, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, library: &Library) -> Result<()> {
        let _span = tracing::debug_span!("library_save", books = library.len()).entered();

        let json = serde_json::to_string_pretty(library)
            .map_err(|e| ShelfmarkError::Storage(format!("failed to serialize library: {e}")))?;
        self.backend.set(LIBRARY_KEY, &json)
    }

    /// Appends `book` to the end of `shelf` as a fresh entry.
    ///
    /// Resets progress and notes and stamps `added_at`. Does not check whether the id
    /// is already shelved; callers dedupe first.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or saved.
    pub fn add_book(&mut self, mut book: Book, shelf: Shelf) -> Result<()> {
        let _span = tracing::debug_span!("library_add_book",
            book_id = %book.id,
            shelf = %shelf
        ).entered();

        let mut library = self.load()?;

        book.progress = 0;
        book.notes = String::new();
        book.added_at = Some(chrono::Utc::now());
        library.shelf_mut(shelf).push(book);

        self.save(&library)?;
        tracing::debug!("book added");
        Ok(())
    }

    /// Moves the book `id` from `from` to the end of `to`.
    ///
    /// Moving to [`Shelf::Finished`] forces progress to 100. Returns `Ok(false)` and
    /// writes nothing when `id` is not on `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or saved.
    pub fn move_book(&mut self, id: &str, from: Shelf, to: Shelf) -> Result<bool> {
        let _span = tracing::debug_span!("library_move_book",
            book_id = %id,
            from = %from,
            to = %to
        ).entered();

        let mut library = self.load()?;
        if !transfer(&mut library, id, from, to) {
            tracing::debug!("book not on source shelf, nothing to move");
            return Ok(false);
        }

        self.save(&library)?;
        tracing::debug!("book moved");
        Ok(true)
    }

    /// Records reading progress and notes for the book `id`.
    ///
    /// Shelves are scanned in the order `toRead`, `reading`, `finished` and the first
    /// match is updated. Progress is clamped to 100. Reaching 100 on a shelf other
    /// than `finished` moves the book there. Returns `Ok(false)` and writes nothing
    /// when no shelf holds `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or saved.
    pub fn update_progress(&mut self, id: &str, progress: u8, notes: &str) -> Result<bool> {
        let _span = tracing::debug_span!("library_update_progress",
            book_id = %id,
            progress = progress
        ).entered();

        let mut library = self.load()?;
        let Some((shelf, index)) = library.locate(id) else {
            tracing::debug!("book not found on any shelf");
            return Ok(false);
        };

        let progress = progress.min(COMPLETE);
        let book = &mut library.shelf_mut(shelf)[index];
        book.progress = progress;
        book.notes = notes.to_string();

        if progress == COMPLETE && shelf != Shelf::Finished {
            tracing::debug!(from = %shelf, "progress complete, moving to finished");
            transfer(&mut library, id, shelf, Shelf::Finished);
        }

        self.save(&library)?;
        Ok(true)
    }
}

/// Moves the first book with `id` on `from` to the end of `to`.
///
/// Returns `false` when `from` does not hold `id`.
fn transfer(library: &mut Library, id: &str, from: Shelf, to: Shelf) -> bool {
    let source = library.shelf_mut(from);
    let Some(index) = source.iter().position(|book| book.id == id) else {
        return false;
    };

    let mut book = source.remove(index);
    if to == Shelf::Finished {
        book.progress = COMPLETE;
    }
    library.shelf_mut(to).push(book);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn store_with(books: &[(&str, Shelf)]) -> LibraryStore<MemoryBlobStore> {
        let mut store = LibraryStore::new(MemoryBlobStore::default());
        for (id, shelf) in books {
            store.add_book(Book::new(*id, *id), *shelf).unwrap();
        }
        store
    }

    #[test]
    fn transfer_within_same_shelf_reappends() {
        let mut library = Library::default();
        library.reading.push(Book::new("a", "A"));
        library.reading.push(Book::new("b", "B"));

        assert!(transfer(&mut library, "a", Shelf::Reading, Shelf::Reading));
        let ids: Vec<_> = library.reading.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn finished_book_can_be_moved_back() {
        let mut store = store_with(&[("a", Shelf::Finished)]);

        assert!(store.move_book("a", Shelf::Finished, Shelf::Reading).unwrap());
        let library = store.load().unwrap();
        assert!(library.finished.is_empty());
        assert_eq!(library.reading[0].id, "a");
        // Progress is left alone when leaving finished.
        assert_eq!(library.reading[0].progress, 0);
    }

    #[test]
    fn progress_above_complete_is_clamped() {
        let mut store = store_with(&[("a", Shelf::Reading)]);

        assert!(store.update_progress("a", 150, "").unwrap());
        let library = store.load().unwrap();
        assert_eq!(library.finished[0].progress, COMPLETE);
    }

    #[test]
    fn complete_progress_on_finished_book_stays_put() {
        let mut store = store_with(&[("a", Shelf::Finished), ("b", Shelf::Finished)]);
        let writes = store.backend().write_count();

        assert!(store.update_progress("a", 100, "reread").unwrap());
        let library = store.load().unwrap();
        let ids: Vec<_> = library.finished.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(library.finished[0].notes, "reread");
        assert_eq!(store.backend().write_count(), writes + 1);
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let mut backend = MemoryBlobStore::default();
        backend.set(LIBRARY_KEY, "not json").unwrap();
        let store = LibraryStore::new(backend);

        assert!(matches!(store.load(), Err(ShelfmarkError::Storage(_))));
    }
}
