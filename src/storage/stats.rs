//! Reading statistics derived from the library.

use crate::domain::book::{Library, Shelf};

/// Shelf counts and completion rate for the statistics view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStats {
    pub to_read: usize,
    pub reading: usize,
    pub finished: usize,
    pub total: usize,

    /// Percentage of shelved books that are finished, 0.0 for an empty library.
    pub completion_rate: f64,
}

impl LibraryStats {
    /// Computes statistics for `library`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfmark::domain::{Book, Library};
    /// use shelfmark::storage::LibraryStats;
    ///
    /// let mut library = Library::default();
    /// library.to_read.push(Book::new("a", "A"));
    /// library.finished.push(Book::new("b", "B"));
    ///
    /// let stats = LibraryStats::from_library(&library);
    /// assert_eq!(stats.total, 2);
    /// assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_library(library: &Library) -> Self {
        let to_read = library.shelf(Shelf::ToRead).len();
        let reading = library.shelf(Shelf::Reading).len();
        let finished = library.shelf(Shelf::Finished).len();
        let total = to_read + reading + finished;

        #[allow(clippy::cast_precision_loss)]
        let completion_rate = if total == 0 {
            0.0
        } else {
            finished as f64 / total as f64 * 100.0
        };

        Self {
            to_read,
            reading,
            finished,
            total,
            completion_rate,
        }
    }

    /// Number of books on `shelf`.
    #[must_use]
    pub const fn count(&self, shelf: Shelf) -> usize {
        match shelf {
            Shelf::ToRead => self.to_read,
            Shelf::Reading => self.reading,
            Shelf::Finished => self.finished,
        }
    }
}
