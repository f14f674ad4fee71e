//! Combined catalog search.
//!
//! Chains a primary catalog (the Internet Archive, which can supply free PDFs) with
//! a fallback catalog (Google Books, which has broader metadata). Calls are strictly
//! sequential: the primary catalog is fully resolved before the fallback is tried.

use crate::domain::error::Result;
use crate::domain::Book;
use crate::provider::archive::InternetArchiveClient;
use crate::provider::google::GoogleBooksClient;
use crate::provider::traits::BookSearchProvider;
use crate::provider::types::SearchFilter;
use crate::Config;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Sequences two providers into one.
///
/// - [`search`](BookSearchProvider::search): primary results if there are any,
///   otherwise fallback results
/// - [`search_by_category`](BookSearchProvider::search_by_category): primary results
///   followed by fallback results, de-duplicated by id (first occurrence wins)
#[derive(Clone)]
pub struct CatalogSearch {
    primary: Arc<dyn BookSearchProvider>,
    fallback: Arc<dyn BookSearchProvider>,
}

impl CatalogSearch {
    pub fn new(primary: Arc<dyn BookSearchProvider>, fallback: Arc<dyn BookSearchProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Internet Archive first, Google Books as fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(InternetArchiveClient::new(config)?),
            Arc::new(GoogleBooksClient::new(config)?),
        ))
    }
}

impl std::fmt::Debug for CatalogSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSearch")
            .field("primary", &self.primary.id())
            .field("fallback", &self.fallback.id())
            .finish()
    }
}

/// Keeps the first book for every id.
fn dedupe_by_id(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.id.clone()))
        .collect()
}

#[async_trait]
impl BookSearchProvider for CatalogSearch {
    fn id(&self) -> &str {
        "catalog"
    }

    async fn search(&self, query: &str, filter: SearchFilter) -> Vec<Book> {
        let primary = self.primary.search(query, filter).await;
        if !primary.is_empty() {
            tracing::debug!(
                provider = self.primary.id(),
                count = primary.len(),
                "using primary catalog results"
            );
            return primary;
        }

        tracing::debug!(provider = self.fallback.id(), "primary catalog empty, falling back");
        self.fallback.search(query, filter).await
    }

    async fn search_by_category(&self, genre: &str) -> Vec<Book> {
        let mut books = self.primary.search_by_category(genre).await;
        books.extend(self.fallback.search_by_category(genre).await);

        let books = dedupe_by_id(books);
        tracing::debug!(genre = %genre, count = books.len(), "category search complete");
        books
    }
}
