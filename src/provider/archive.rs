//! Internet Archive catalog client.
//!
//! Searches the archive's advanced-search API for freely downloadable PDF texts and
//! then resolves a direct PDF link for every hit by reading the item's file listing.
//! Link lookups run concurrently and independently: one failed lookup only means
//! that candidate has no download link.

use crate::domain::error::Result;
use crate::domain::Book;
use crate::provider::http_client;
use crate::provider::traits::BookSearchProvider;
use crate::provider::types::{ArchiveSearchResponse, CatalogRecord, SearchFilter};
use crate::Config;
use async_trait::async_trait;
use futures_util::future::join_all;
use regex::Regex;
use reqwest::Client;
use tracing::Instrument;

/// Restricts hits to downloadable PDF texts.
const PDF_CLAUSE: &str =
    "AND format:pdf AND mediatype:texts AND _exists_:pdf AND collection:(opensource OR additional_collections)";

/// Fields requested from advanced search.
const FIELDS: [&str; 7] = [
    "identifier",
    "title",
    "creator",
    "description",
    "downloads",
    "imagecount",
    "format",
];

/// Searches the Internet Archive and resolves PDF download links.
#[derive(Debug, Clone)]
pub struct InternetArchiveClient {
    client: Client,
    base_url: String,
    rows: u32,
}

impl InternetArchiveClient {
    /// Builds a client from the catalog settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShelfmarkError::Provider`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.archive_base_url.trim_end_matches('/').to_string(),
            rows: config.max_results,
        })
    }

    async fn fetch_docs(&self, term: &str) -> std::result::Result<Vec<Book>, reqwest::Error> {
        let mut params = vec![
            ("q", format!("{term} {PDF_CLAUSE}")),
            ("rows", self.rows.to_string()),
            ("output", "json".to_string()),
            ("sort[]", "downloads desc".to_string()),
            ("filters", "downloadable:true".to_string()),
        ];
        params.extend(FIELDS.iter().map(|field| ("fl[]", (*field).to_string())));

        let response: ArchiveSearchResponse = self
            .client
            .get(format!("{}/advancedsearch.php", self.base_url))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .response
            .map(|r| r.docs)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|doc| CatalogRecord::Archive(doc).into_book())
            .collect())
    }

    async fn fetch_listing(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    /// Looks up the direct PDF link for one archive item.
    ///
    /// Any failure is logged and yields `None`.
    pub async fn resolve_download_url(&self, identifier: &str) -> Option<String> {
        let url = format!(
            "{}/download/{identifier}/{identifier}_files.xml",
            self.base_url
        );

        match self.fetch_listing(&url).await {
            Ok(listing) => {
                let file = find_pdf_file(identifier, &listing)?;
                Some(format!("{}/download/{identifier}/{file}", self.base_url))
            }
            Err(e) => {
                tracing::debug!(identifier = %identifier, error = %e, "file listing lookup failed");
                None
            }
        }
    }

    /// Runs a search and attaches download links to every hit.
    async fn search_with_links(&self, term: &str) -> Vec<Book> {
        let span = tracing::debug_span!("archive_search", term = %term);

        async {
            let books = match self.fetch_docs(term).await {
                Ok(books) => books,
                Err(e) => {
                    tracing::warn!(error = %e, "internet archive search failed");
                    return Vec::new();
                }
            };

            let enriched = join_all(books.into_iter().map(|mut book| async move {
                book.download_url = self.resolve_download_url(&book.id).await;
                book
            }))
            .await;

            tracing::debug!(
                count = enriched.len(),
                with_links = enriched.iter().filter(|b| b.download_url.is_some()).count(),
                "internet archive search complete"
            );
            enriched
        }
        .instrument(span)
        .await
    }
}

/// Finds the first PDF file belonging to `identifier` in an item's file listing.
///
/// # Examples
///
/// ```
/// use shelfmark::provider::archive::find_pdf_file;
///
/// let listing = r#"<files><file name="flatland_meta.xml"/><file name="flatland.pdf"/></files>"#;
/// assert_eq!(find_pdf_file("flatland", listing).as_deref(), Some("flatland.pdf"));
/// assert_eq!(find_pdf_file("flatland", "<files/>"), None);
/// ```
#[must_use]
pub fn find_pdf_file(identifier: &str, listing: &str) -> Option<String> {
    let pattern = format!(r#"{}[^"<>]*?\.pdf"#, regex::escape(identifier));
    let re = Regex::new(&pattern).ok()?;
    re.find(listing).map(|m| m.as_str().to_string())
}

/// Builds the advanced-search term for a free-text query.
#[must_use]
pub fn search_term(query: &str, filter: SearchFilter) -> String {
    let query = query.trim();
    match filter {
        SearchFilter::All | SearchFilter::Title => format!("title:({query})"),
        SearchFilter::Author => format!("creator:({query})"),
    }
}

/// Builds the advanced-search term for a subject lookup.
#[must_use]
pub fn subject_term(genre: &str) -> String {
    format!("subject:(\"{}\")", genre.trim().replace('"', ""))
}

#[async_trait]
impl BookSearchProvider for InternetArchiveClient {
    fn id(&self) -> &str {
        "archive"
    }

    async fn search(&self, query: &str, filter: SearchFilter) -> Vec<Book> {
        self.search_with_links(&search_term(query, filter)).await
    }

    async fn search_by_category(&self, genre: &str) -> Vec<Book> {
        self.search_with_links(&subject_term(genre)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    /// Serves canned archive responses on a local port and returns its base URL.
    ///
    /// Routes on the request path only. Anything not listed in `routes` gets a 500.
    fn serve(routes: &'static [(&'static str, &'static str)]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut header = String::new();
                while reader.read_line(&mut header).unwrap_or(0) > 2 {
                    header.clear();
                }

                let target = request_line.split_whitespace().nth(1).unwrap_or("/");
                let path = target.split('?').next().unwrap_or(target);
                let (status, body) = routes
                    .iter()
                    .find(|(route, _)| *route == path)
                    .map_or(("500 Internal Server Error", ""), |(_, body)| ("200 OK", *body));

                let _ = write!(
                    stream,
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
            }
        });

        base
    }

    fn client(base_url: String) -> InternetArchiveClient {
        InternetArchiveClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url,
            rows: 20,
        }
    }

    #[tokio::test]
    async fn failed_link_lookup_only_affects_its_own_hit() {
        let base = serve(&[
            (
                "/advancedsearch.php",
                r#"{"response":{"docs":[{"identifier":"a1","title":"First"},{"identifier":"a2","title":"Second"}]}}"#,
            ),
            ("/download/a1/a1_files.xml", r#"<files><file name="a1_text.pdf"/></files>"#),
        ]);
        let archive = client(base.clone());

        let books = archive.search("anything", SearchFilter::All).await;

        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2"]);
        assert_eq!(
            books[0].download_url.as_deref(),
            Some(format!("{base}/download/a1/a1_text.pdf").as_str())
        );
        assert_eq!(books[1].download_url, None);
    }

    #[tokio::test]
    async fn failed_search_is_an_empty_result() {
        let archive = client(serve(&[]));
        assert!(archive.search("anything", SearchFilter::All).await.is_empty());
        assert!(archive.search_by_category("fantasy").await.is_empty());
    }

    #[test]
    fn pdf_match_ignores_other_items_and_formats() {
        let listing = r#"<?xml version="1.0"?>
<files>
  <file name="other_item.pdf" source="original"/>
  <file name="alice_djvu.txt" source="derivative"/>
  <file name="alice_text.pdf" source="derivative"/>
</files>"#;

        assert_eq!(find_pdf_file("alice", listing).as_deref(), Some("alice_text.pdf"));
        assert_eq!(find_pdf_file("bob", listing), None);
    }

    #[test]
    fn identifier_is_matched_literally() {
        let listing = r#"<file name="a.b.pdf"/><file name="axb.pdf"/>"#;
        assert_eq!(find_pdf_file("a.b", listing).as_deref(), Some("a.b.pdf"));
        assert_eq!(find_pdf_file("a+b", listing), None);
    }

    #[test]
    fn search_terms() {
        assert_eq!(search_term(" dune ", SearchFilter::All), "title:(dune)");
        assert_eq!(search_term("dune", SearchFilter::Title), "title:(dune)");
        assert_eq!(search_term("herbert", SearchFilter::Author), "creator:(herbert)");
        assert_eq!(subject_term("science \"fiction\""), "subject:(\"science fiction\")");
    }
}
