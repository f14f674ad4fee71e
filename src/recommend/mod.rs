//! Genre recommendations ranked against reading history.
//!
//! # Modules
//!
//! - [`score`]: Scoring rules, reason text and ranking
//! - [`engine`]: Provider-backed recommendation engine
//! - [`types`]: Annotated recommendation record

pub mod engine;
pub mod score;
pub mod types;

pub use engine::RecommendationEngine;
pub use score::{rank, reason, score, MAX_RECOMMENDATIONS};
pub use types::Recommendation;
