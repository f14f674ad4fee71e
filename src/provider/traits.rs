use crate::domain::Book;
use crate::provider::types::SearchFilter;
use async_trait::async_trait;

/// A source of candidate books.
///
/// Implementations never fail: transport errors, bad status codes and unparseable
/// responses are logged and reported as an empty result.
#[async_trait]
pub trait BookSearchProvider: Send + Sync {
    /// Short identifier used in logs (e.g. "google", "archive").
    fn id(&self) -> &str;

    /// Free-text search, optionally narrowed to titles or authors.
    async fn search(&self, query: &str, filter: SearchFilter) -> Vec<Book>;

    /// Books tagged with the given genre or subject.
    async fn search_by_category(&self, genre: &str) -> Vec<Book>;
}
