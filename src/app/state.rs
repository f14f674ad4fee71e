//! Application object graph.
//!
//! [`App`] owns the one library store and the one search provider of a process and
//! hands the provider to the recommendation engine. It is built once at startup
//! (see [`crate::initialize`]) and passed by reference to
//! [`handle_command`](crate::app::handle_command).

use crate::provider::BookSearchProvider;
use crate::recommend::RecommendationEngine;
use crate::storage::{BlobStore, LibraryStore};
use std::sync::Arc;

/// Everything a command needs to run.
///
/// # Example
///
/// ```rust
/// use shelfmark::provider::{BookSearchProvider, SearchFilter};
/// use shelfmark::storage::{LibraryStore, MemoryBlobStore};
/// use shelfmark::{App, Book};
/// use std::sync::Arc;
///
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl BookSearchProvider for Offline {
///     fn id(&self) -> &str { "offline" }
///     async fn search(&self, _: &str, _: SearchFilter) -> Vec<Book> { Vec::new() }
///     async fn search_by_category(&self, _: &str) -> Vec<Book> { Vec::new() }
/// }
///
/// let app = App::new(LibraryStore::new(MemoryBlobStore::default()), Arc::new(Offline));
/// assert!(app.store().load()?.is_empty());
/// # Ok::<(), shelfmark::ShelfmarkError>(())
/// ```
pub struct App<S> {
    pub(crate) store: LibraryStore<S>,
    pub(crate) provider: Arc<dyn BookSearchProvider>,
    pub(crate) engine: RecommendationEngine,
}

impl<S: BlobStore> App<S> {
    /// Wires a store and a provider; the engine shares the provider.
    pub fn new(store: LibraryStore<S>, provider: Arc<dyn BookSearchProvider>) -> Self {
        let engine = RecommendationEngine::new(Arc::clone(&provider));
        Self {
            store,
            provider,
            engine,
        }
    }

    pub const fn store(&self) -> &LibraryStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LibraryStore<S> {
        &mut self.store
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("provider", &self.provider.id())
            .field("engine", &self.engine)
            .finish()
    }
}
