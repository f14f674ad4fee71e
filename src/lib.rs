//! shelfmark: a personal reading tracker for the terminal.
//!
//! shelfmark provides:
//! - Book search across the Internet Archive and Google Books
//! - Three reading shelves ("to read", "reading", "finished") persisted locally
//! - Progress tracking with automatic completion at 100%
//! - Genre recommendations ranked against what you have already finished
//! - Simple reading statistics

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI entry point (main.rs)                          │  ← argv → Command
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Command → View
//! │  - Command parsing                                  │
//! │  - Explicitly wired App (store, provider, engine)   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Providers     │
//! │ (ui/)         │   │ (storage/)    │   │ (provider/)   │
//! │ - Text output │   │ - Blob store  │   │ - Archive     │
//! │               │   │ - Shelves     │   │ - Google      │
//! │               │   │ - Stats       │   │ - Combined    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │                    │
//!                     ┌─────────────────────────────────────┐
//!                     │ Recommendations (recommend/)        │
//!                     └─────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Book / Shelf / Library (domain/book)             │
//! │  - Error types (domain/error)                       │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Command parsing and execution
//! - [`domain`]: Core domain types (Book, Shelf, Library, errors)
//! - [`infrastructure`]: Platform-specific paths
//! - [`provider`]: Catalog clients behind the [`provider::BookSearchProvider`] trait
//! - [`recommend`]: Recommendation scoring and ranking
//! - [`storage`]: Blob stores and the library store
//! - [`ui`]: Plain-text rendering
//! - `observability`: Tracing setup with optional span file export
//!
//! # Configuration
//!
//! Settings are read from a TOML file (`~/.config/shelfmark/config.toml` on Linux,
//! or the path given with `--config`):
//!
//! ```toml
//! data_dir = "~/books/shelfmark"
//! google_api_key = "..."
//! max_results = 20
//! request_timeout_secs = 15
//! trace_level = "debug"
//! trace_file = "~/books/shelfmark/traces.jsonl"
//! ```
//!
//! # Example
//!
//! ```rust
//! use shelfmark::domain::{Book, Shelf};
//! use shelfmark::storage::{LibraryStore, MemoryBlobStore};
//!
//! let mut store = LibraryStore::new(MemoryBlobStore::default());
//! store.add_book(Book::new("OL123", "A Wizard of Earthsea"), Shelf::ToRead)?;
//! store.move_book("OL123", Shelf::ToRead, Shelf::Reading)?;
//! store.update_progress("OL123", 40, "halfway through Roke")?;
//!
//! let library = store.load()?;
//! assert_eq!(library.reading[0].progress, 40);
//! # Ok::<(), shelfmark::ShelfmarkError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod provider;
pub mod recommend;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_command, App, Command, Invocation};
pub use domain::{Book, Library, Result, Shelf, ShelfmarkError};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration.
///
/// Every key is optional in the TOML file; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the library document. `~` is expanded.
    ///
    /// Default: the platform data directory joined with `shelfmark`.
    pub data_dir: Option<String>,

    /// Google Books API key. Requests are sent without a key when unset.
    pub google_api_key: Option<String>,

    /// Google Books API root. Default: `https://www.googleapis.com/books/v1`
    pub google_base_url: String,

    /// Internet Archive root. Default: `https://archive.org`
    pub archive_base_url: String,

    /// Results requested per catalog call (1-40). Default: 20
    pub max_results: u32,

    /// Per-request timeout in seconds. Default: 15
    pub request_timeout_secs: u64,

    /// Tracing filter directive such as `info` or `shelfmark=debug`.
    ///
    /// `RUST_LOG` takes precedence. Default: `warn`
    pub trace_level: Option<String>,

    /// File receiving one JSON line per finished span. Disabled when unset.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            google_api_key: None,
            google_base_url: "https://www.googleapis.com/books/v1".to_string(),
            archive_base_url: "https://archive.org".to_string(),
            max_results: 20,
            request_timeout_secs: 15,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Largest page size Google Books accepts.
    pub const MAX_RESULTS_LIMIT: u32 = 40;

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::Config`] for malformed TOML, unknown keys or
    /// out-of-range values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shelfmark::Config;
    ///
    /// let config = Config::from_toml("max_results = 10\ntrace_level = \"debug\"")?;
    /// assert_eq!(config.max_results, 10);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// # Ok::<(), shelfmark::ShelfmarkError>(())
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ShelfmarkError::Config(e.to_string()))?;

        if config.max_results == 0 || config.max_results > Self::MAX_RESULTS_LIMIT {
            return Err(ShelfmarkError::Config(format!(
                "max_results must be between 1 and {}, got {}",
                Self::MAX_RESULTS_LIMIT,
                config.max_results
            )));
        }
        if config.request_timeout_secs == 0 {
            return Err(ShelfmarkError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ShelfmarkError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// Loads configuration from `explicit`, else the default location, else defaults.
    ///
    /// An explicitly given file must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match infrastructure::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::default_data_dir, infrastructure::expand_tilde)
    }

    /// Resolved span export file, if enabled.
    #[must_use]
    pub fn trace_file_path(&self) -> Option<PathBuf> {
        self.trace_file.as_deref().map(infrastructure::expand_tilde)
    }
}

/// Wires the application from configuration.
///
/// Opens the file-backed library in [`Config::data_dir`] and builds the combined
/// catalog provider plus a recommendation engine sharing it. Call once at startup
/// and pass the returned [`App`] to [`handle_command`].
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the HTTP clients
/// cannot be built.
pub fn initialize(config: &Config) -> Result<App<storage::FileBlobStore>> {
    tracing::debug!(data_dir = ?config.data_dir(), "initializing shelfmark");

    let store = storage::LibraryStore::new(storage::FileBlobStore::new(config.data_dir())?);
    let catalog: Arc<dyn provider::BookSearchProvider> =
        Arc::new(provider::CatalogSearch::from_config(config)?);

    Ok(App::new(store, catalog))
}
