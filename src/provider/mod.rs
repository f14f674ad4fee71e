//! Book search providers.
//!
//! Remote catalogs are hidden behind [`BookSearchProvider`]. Each catalog's response
//! is deserialized into its own raw record type and normalized into
//! [`crate::domain::Book`] at this boundary, so nothing past it ever sees a
//! catalog-specific shape. Providers swallow their own failures: the rest of the
//! crate only ever sees a (possibly empty) list of candidates.
//!
//! # Modules
//!
//! - [`traits`]: The provider trait
//! - [`types`]: Raw catalog records and normalization
//! - [`google`]: Google Books client
//! - [`archive`]: Internet Archive client with PDF link resolution
//! - [`catalog`]: Sequential combination of the two

pub mod archive;
pub mod catalog;
pub mod google;
pub mod traits;
pub mod types;

pub use archive::InternetArchiveClient;
pub use catalog::CatalogSearch;
pub use google::GoogleBooksClient;
pub use traits::BookSearchProvider;
pub use types::{CatalogRecord, SearchFilter};

use crate::domain::error::{Result, ShelfmarkError};
use crate::Config;
use std::time::Duration;

/// Builds the HTTP client shared by the catalog clients.
///
/// Requests are bounded by `config.request_timeout_secs`; a timeout is treated like
/// any other provider failure.
pub(crate) fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!("shelfmark/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ShelfmarkError::Provider(format!("failed to build HTTP client: {e}")))
}
