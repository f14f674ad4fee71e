//! Domain layer for shelfmark.
//!
//! Core types independent of storage backends, catalogs and the terminal front end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book, shelf and library model
//!
//! # Examples
//!
//! ```
//! use shelfmark::domain::{Book, Library, Shelf};
//!
//! let mut library = Library::default();
//! library.shelf_mut(Shelf::Reading).push(Book::new("id-1", "Dune"));
//! assert_eq!(library.locate("id-1"), Some((Shelf::Reading, 0)));
//! ```

pub mod book;
pub mod error;

pub use book::{Book, Library, Shelf};
pub use error::{Result, ShelfmarkError};
