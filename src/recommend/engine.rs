//! Recommendation engine.
//!
//! Fetches candidates for a genre from a [`BookSearchProvider`] and ranks them
//! against the user's finished shelf.

use crate::domain::Book;
use crate::provider::BookSearchProvider;
use crate::recommend::score::rank;
use crate::recommend::types::Recommendation;
use std::sync::Arc;
use tracing::Instrument;

/// Produces ranked genre recommendations.
///
/// Holds a shared handle to the search provider; create it once and pass it to
/// whoever needs recommendations.
#[derive(Clone)]
pub struct RecommendationEngine {
    provider: Arc<dyn BookSearchProvider>,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn BookSearchProvider>) -> Self {
        Self { provider }
    }

    /// Recommends up to ten books for `genre`.
    ///
    /// `finished` is the user's finished shelf and serves as reading history. An
    /// empty result means "no results": the provider found nothing or failed, and
    /// there is nothing to retry.
    pub async fn recommend(&self, genre: &str, finished: &[Book]) -> Vec<Recommendation> {
        let genre = genre.trim();
        let span = tracing::info_span!("recommend", genre = %genre, history = finished.len());

        async {
            if genre.is_empty() {
                tracing::debug!("empty genre, nothing to recommend");
                return Vec::new();
            }

            let candidates = self.provider.search_by_category(genre).await;
            if candidates.is_empty() {
                tracing::info!("no candidates found");
                return Vec::new();
            }

            let candidate_count = candidates.len();
            let ranked = rank(candidates, finished, genre);
            tracing::debug!(
                candidates = candidate_count,
                returned = ranked.len(),
                top_score = ranked.first().map_or(0, |r| r.score),
                "recommendations ranked"
            );
            ranked
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("provider", &self.provider.id())
            .finish()
    }
}
