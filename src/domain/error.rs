//! Error types for shelfmark.
//!
//! This module defines the centralized error type [`ShelfmarkError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.
//!
//! Note that most "failures" in the reading tracker are not errors at all: an unknown
//! book id is a silent no-op for the library store, and a catalog that is down simply
//! yields no results. The variants below cover what is left.

use thiserror::Error;

/// The main error type for shelfmark operations.
///
/// # Examples
///
/// ```
/// use shelfmark::ShelfmarkError;
///
/// fn parse_shelf_arg() -> Result<(), ShelfmarkError> {
///     Err(ShelfmarkError::Command("unknown shelf 'someday'".to_string()))
/// }
///
/// assert!(parse_shelf_arg().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    /// The persisted library document could not be read, parsed or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using `#[from]`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog client could not be constructed.
    ///
    /// Request-level failures never surface here; providers log them and return
    /// an empty result set instead.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration file is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line input could not be understood.
    #[error("Invalid command: {0}")]
    Command(String),
}

/// A specialized `Result` type for shelfmark operations.
pub type Result<T> = std::result::Result<T, ShelfmarkError>;
