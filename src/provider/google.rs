//! Google Books catalog client.

use crate::domain::error::Result;
use crate::domain::Book;
use crate::provider::http_client;
use crate::provider::traits::BookSearchProvider;
use crate::provider::types::{CatalogRecord, GoogleSearchResponse, SearchFilter};
use crate::Config;
use async_trait::async_trait;
use reqwest::Client;
use tracing::Instrument;

/// Searches the Google Books `volumes` endpoint.
///
/// Google Books records never carry a download URL.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
}

impl GoogleBooksClient {
    /// Builds a client from the catalog settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShelfmarkError::Provider`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.google_base_url.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
            max_results: config.max_results,
        })
    }

    /// Runs one `volumes` query and normalizes the hits.
    async fn fetch(&self, q: &str) -> std::result::Result<Vec<Book>, reqwest::Error> {
        let mut params = vec![
            ("q", q.to_string()),
            ("maxResults", self.max_results.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let response: GoogleSearchResponse = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|volume| CatalogRecord::Google(volume).into_book())
            .collect())
    }

    async fn fetch_or_empty(&self, q: &str) -> Vec<Book> {
        let span = tracing::debug_span!("google_fetch", q = %q);

        match self.fetch(q).instrument(span).await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "google books search complete");
                books
            }
            Err(e) => {
                tracing::warn!(error = %e, "google books search failed");
                Vec::new()
            }
        }
    }
}

/// Builds the `q` parameter for a free-text search.
///
/// # Examples
///
/// ```
/// use shelfmark::provider::google::volume_query;
/// use shelfmark::provider::SearchFilter;
///
/// assert_eq!(volume_query("dune", SearchFilter::All), "dune");
/// assert_eq!(volume_query("dune", SearchFilter::Title), "intitle:dune");
/// assert_eq!(volume_query("herbert", SearchFilter::Author), "inauthor:herbert");
/// ```
#[must_use]
pub fn volume_query(query: &str, filter: SearchFilter) -> String {
    match filter {
        SearchFilter::All => query.to_string(),
        SearchFilter::Title | SearchFilter::Author => format!("in{filter}:{query}"),
    }
}

#[async_trait]
impl BookSearchProvider for GoogleBooksClient {
    fn id(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str, filter: SearchFilter) -> Vec<Book> {
        self.fetch_or_empty(&volume_query(query, filter)).await
    }

    async fn search_by_category(&self, genre: &str) -> Vec<Book> {
        self.fetch_or_empty(&format!("subject:{genre}")).await
    }
}
