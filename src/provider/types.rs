//! Catalog response shapes and their normalization into [`Book`].
//!
//! Both catalogs return loosely typed JSON. Every field is deserialized as optional
//! and [`CatalogRecord::into_book`] decides, field by field, whether the catalog
//! supplied a usable value or the sentinel from [`crate::domain::book`] applies.

use crate::domain::book::{
    Book, NO_DESCRIPTION, PLACEHOLDER_THUMBNAIL, UNCATEGORIZED, UNKNOWN_AUTHOR, UNKNOWN_TITLE,
};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::ShelfmarkError;

/// Category given to every Internet Archive record.
pub const ARCHIVE_CATEGORY: &str = "Internet Archive";

/// Field a free-text search is narrowed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchFilter {
    #[default]
    All,
    Title,
    Author,
}

impl SearchFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchFilter {
    type Err = ShelfmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            other => Err(ShelfmarkError::Command(format!(
                "unknown filter '{other}' (expected all, title or author)"
            ))),
        }
    }
}

/// A metadata value the archive returns either as a scalar or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Non-empty entries, trimmed.
    fn values(&self) -> Vec<String> {
        let raw: Vec<&String> = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values.iter().collect(),
        };
        raw.into_iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    }

    fn first(&self) -> Option<String> {
        self.values().into_iter().next()
    }
}

/// A count the archive returns as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(u64),
    Text(String),
}

impl Count {
    /// The numeric value; unparseable text counts as 0.
    fn get(&self) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }
}

/// Internet Archive advanced-search envelope.
#[derive(Debug, Default, Deserialize)]
pub struct ArchiveSearchResponse {
    #[serde(default)]
    pub response: Option<ArchiveDocs>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArchiveDocs {
    #[serde(default)]
    pub docs: Vec<ArchiveDoc>,
}

/// One Internet Archive search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArchiveDoc {
    pub identifier: Option<String>,
    pub title: Option<OneOrMany>,
    pub creator: Option<OneOrMany>,
    pub description: Option<OneOrMany>,
    pub imagecount: Option<Count>,
}

/// Google Books `volumes` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct GoogleSearchResponse {
    #[serde(default)]
    pub items: Vec<GoogleVolume>,
}

/// One Google Books volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolume {
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: GoogleVolumeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub page_count: Option<u32>,
    pub image_links: Option<GoogleImageLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GoogleImageLinks {
    pub thumbnail: Option<String>,
}

/// A raw catalog hit, tagged by the catalog it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRecord {
    Archive(ArchiveDoc),
    Google(GoogleVolume),
}

impl CatalogRecord {
    /// Normalizes the record into a candidate [`Book`].
    ///
    /// Returns `None` for records without an identifier, which cannot be shelved.
    /// The download URL is never set here; it needs a separate lookup.
    #[must_use]
    pub fn into_book(self) -> Option<Book> {
        match self {
            Self::Archive(doc) => archive_book(doc),
            Self::Google(volume) => google_book(volume),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .map(|vs| {
            vs.into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|vs| !vs.is_empty())
}

fn archive_book(doc: ArchiveDoc) -> Option<Book> {
    let id = non_blank(doc.identifier)?;

    let mut book = Book::new(
        id.clone(),
        doc.title
            .as_ref()
            .and_then(OneOrMany::first)
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
    );
    if let Some(creators) = doc.creator.as_ref().map(OneOrMany::values) {
        if !creators.is_empty() {
            book.authors = creators;
        }
    }
    if let Some(description) = doc.description.as_ref().and_then(OneOrMany::first) {
        book.description = description;
    }
    book.thumbnail = format!("https://archive.org/services/img/{id}");
    book.categories = vec![ARCHIVE_CATEGORY.to_string()];
    book.page_count = doc
        .imagecount
        .as_ref()
        .map_or(0, |count| u32::try_from(count.get()).unwrap_or(u32::MAX));
    Some(book)
}

fn google_book(volume: GoogleVolume) -> Option<Book> {
    let id = non_blank(volume.id)?;
    let info = volume.volume_info;

    let mut book = Book::new(id, non_blank(info.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()));
    book.authors = non_empty(info.authors).unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]);
    book.description = non_blank(info.description).unwrap_or_else(|| NO_DESCRIPTION.to_string());
    book.categories = non_empty(info.categories).unwrap_or_else(|| vec![UNCATEGORIZED.to_string()]);
    book.page_count = info.page_count.unwrap_or(0);
    book.thumbnail = non_blank(info.image_links.and_then(|links| links.thumbnail))
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string());
    Some(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_volume_fills_sentinels() {
        let json = r#"{"items": [{"id": "g1", "volumeInfo": {"title": "Dune"}}]}"#;
        let response: GoogleSearchResponse = serde_json::from_str(json).unwrap();
        let volume = response.items.into_iter().next().unwrap();

        let book = CatalogRecord::Google(volume).into_book().unwrap();
        assert_eq!(book.id, "g1");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR]);
        assert_eq!(book.categories, vec![UNCATEGORIZED]);
        assert_eq!(book.description, NO_DESCRIPTION);
        assert_eq!(book.thumbnail, PLACEHOLDER_THUMBNAIL);
        assert_eq!(book.page_count, 0);
        assert!(book.download_url.is_none());
    }

    #[test]
    fn google_volume_keeps_supplied_fields() {
        let json = r#"{
            "id": "g2",
            "volumeInfo": {
                "title": "The Hobbit",
                "authors": ["J.R.R. Tolkien"],
                "categories": ["Fiction", "Fantasy"],
                "pageCount": 310,
                "imageLinks": {"thumbnail": "http://img/hobbit"}
            }
        }"#;
        let volume: GoogleVolume = serde_json::from_str(json).unwrap();

        let book = CatalogRecord::Google(volume).into_book().unwrap();
        assert_eq!(book.authors, vec!["J.R.R. Tolkien"]);
        assert_eq!(book.categories, vec!["Fiction", "Fantasy"]);
        assert_eq!(book.page_count, 310);
        assert_eq!(book.thumbnail, "http://img/hobbit");
    }

    #[test]
    fn google_volume_with_empty_author_list_uses_sentinel() {
        let volume = GoogleVolume {
            id: Some("g3".to_string()),
            volume_info: GoogleVolumeInfo {
                authors: Some(vec![" ".to_string()]),
                ..GoogleVolumeInfo::default()
            },
        };

        let book = CatalogRecord::Google(volume).into_book().unwrap();
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR]);
        assert_eq!(book.title, UNKNOWN_TITLE);
    }

    #[test]
    fn archive_doc_accepts_scalar_or_list_fields() {
        let json = r#"{"response": {"docs": [
            {"identifier": "a1", "title": "Flatland", "creator": "Abbott", "imagecount": 112},
            {"identifier": "a2", "creator": ["One", "Two"], "description": ["First", "Second"], "imagecount": "88"}
        ]}}"#;
        let response: ArchiveSearchResponse = serde_json::from_str(json).unwrap();
        let docs = response.response.unwrap().docs;

        let first = CatalogRecord::Archive(docs[0].clone()).into_book().unwrap();
        assert_eq!(first.title, "Flatland");
        assert_eq!(first.authors, vec!["Abbott"]);
        assert_eq!(first.page_count, 112);
        assert_eq!(first.categories, vec![ARCHIVE_CATEGORY]);
        assert_eq!(first.thumbnail, "https://archive.org/services/img/a1");
        assert_eq!(first.description, NO_DESCRIPTION);

        let second = CatalogRecord::Archive(docs[1].clone()).into_book().unwrap();
        assert_eq!(second.title, UNKNOWN_TITLE);
        assert_eq!(second.authors, vec!["One", "Two"]);
        assert_eq!(second.description, "First");
        assert_eq!(second.page_count, 88);
    }

    #[test]
    fn records_without_identifier_are_dropped() {
        assert!(CatalogRecord::Archive(ArchiveDoc::default()).into_book().is_none());
        assert!(CatalogRecord::Google(GoogleVolume::default()).into_book().is_none());
    }

    #[test]
    fn filter_parses() {
        assert_eq!("Title".parse::<SearchFilter>().unwrap(), SearchFilter::Title);
        assert_eq!("author".parse::<SearchFilter>().unwrap(), SearchFilter::Author);
        assert_eq!("all".parse::<SearchFilter>().unwrap(), SearchFilter::All);
        assert!("isbn".parse::<SearchFilter>().is_err());
    }
}
