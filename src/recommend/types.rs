use crate::domain::Book;

/// A candidate book annotated for display.
///
/// Score and reason are computed per search and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub book: Book,
    pub score: u32,
    pub reason: String,
}
