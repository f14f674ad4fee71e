//! View models produced by command execution.
//!
//! A [`View`] carries display-ready data and no behavior. The handler builds one per
//! command and [`crate::ui::render`] turns it into text, so output formatting can be
//! tested without touching storage or the network.

use crate::domain::{Book, Library, Shelf};
use crate::recommend::Recommendation;
use crate::storage::LibraryStats;

/// Everything a command can ask the terminal to show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Catalog search results, in provider order.
    SearchResults { query: String, books: Vec<Book> },

    /// Ranked recommendations for a genre. Empty means "no results".
    Recommendations {
        genre: String,
        recommendations: Vec<Recommendation>,
    },

    /// The library, or only `shelf` when given.
    Shelves {
        library: Library,
        shelf: Option<Shelf>,
    },

    Stats(LibraryStats),

    /// A one-line outcome such as "Added 'Dune' to To Read".
    Notice(String),

    Help,
}
