//! Book, shelf and library domain model.
//!
//! A [`Book`] is the single record type shared by catalog search results and shelved
//! entries. Search providers normalize whatever their catalog returns into this shape,
//! filling the sentinel values below when a field is missing. Once a book is added to
//! the [`Library`] it additionally carries reading progress, notes and the time it was
//! added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ShelfmarkError;

/// Title used when a catalog record has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author used when a catalog record lists none.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Thumbnail used when a catalog record has no cover image.
pub const PLACEHOLDER_THUMBNAIL: &str = "placeholder-image.jpg";

/// Description used when a catalog record has none.
pub const NO_DESCRIPTION: &str = "No description available";

/// Category used when a catalog record lists none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A book, either a search candidate or an entry on one of the shelves.
///
/// Serialized with camelCase field names, which is also the persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Stable identifier from the source catalog.
    pub id: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Never empty; falls back to [`UNKNOWN_AUTHOR`].
    #[serde(default = "default_authors")]
    pub authors: Vec<String>,

    /// Cover URL or [`PLACEHOLDER_THUMBNAIL`].
    #[serde(default = "default_thumbnail")]
    pub thumbnail: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Genre/subject tags. Never empty; falls back to [`UNCATEGORIZED`].
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Number of pages, 0 when unknown.
    #[serde(default)]
    pub page_count: u32,

    /// Direct link to a freely downloadable copy, if one was found.
    #[serde(default, alias = "iaUrl", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    /// Reading progress in percent (0-100).
    ///
    /// Older documents may hold `null` or a fractional value here; both load.
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: u8,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,

    /// Set exactly once, when the book is put on a shelf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

// Shelved entries written by earlier versions only carry the fields that were
// shown on a card, so every descriptive field falls back to its sentinel.
fn default_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn default_authors() -> Vec<String> {
    vec![UNKNOWN_AUTHOR.to_string()]
}

fn default_thumbnail() -> String {
    PLACEHOLDER_THUMBNAIL.to_string()
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

fn default_categories() -> Vec<String> {
    vec![UNCATEGORIZED.to_string()]
}

/// Reads progress as any JSON number or `null`, rounded and clamped to 0-100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite())
        .map_or(0, |v| v.round().clamp(0.0, 100.0) as u8))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Book {
    /// Creates a candidate book with every optional field at its sentinel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfmark::domain::Book;
    ///
    /// let book = Book::new("abc123", "The Hobbit");
    /// assert_eq!(book.authors, vec!["Unknown Author"]);
    /// assert_eq!(book.page_count, 0);
    /// assert!(book.added_at.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: vec![UNKNOWN_AUTHOR.to_string()],
            thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            description: NO_DESCRIPTION.to_string(),
            categories: vec![UNCATEGORIZED.to_string()],
            page_count: 0,
            download_url: None,
            progress: 0,
            notes: String::new(),
            added_at: None,
        }
    }

    /// Returns the authors joined for display.
    #[must_use]
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// One of the three reading shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shelf {
    ToRead,
    Reading,
    Finished,
}

impl Shelf {
    /// All shelves in their fixed scan order.
    pub const ALL: [Self; 3] = [Self::ToRead, Self::Reading, Self::Finished];

    /// Name used in the persisted document and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToRead => "toRead",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }

    /// Human-readable heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToRead => "To Read",
            Self::Reading => "Currently Reading",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shelf {
    type Err = ShelfmarkError;

    /// Parses a shelf name case-insensitively.
    ///
    /// Accepts `toRead`, `to-read`, `to_read`, `reading` and `finished`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toread" | "to-read" | "to_read" => Ok(Self::ToRead),
            "reading" => Ok(Self::Reading),
            "finished" => Ok(Self::Finished),
            other => Err(ShelfmarkError::Command(format!(
                "unknown shelf '{other}' (expected toRead, reading or finished)"
            ))),
        }
    }
}

/// The three-shelf collection; the only thing that is persisted.
///
/// Each shelf keeps insertion order. A book id is expected to appear on at most one
/// shelf, but nothing here enforces it: callers dedupe before adding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default)]
    pub to_read: Vec<Book>,
    #[serde(default)]
    pub reading: Vec<Book>,
    #[serde(default)]
    pub finished: Vec<Book>,
}

impl Library {
    /// Returns the books on `shelf`.
    #[must_use]
    pub fn shelf(&self, shelf: Shelf) -> &[Book] {
        match shelf {
            Shelf::ToRead => &self.to_read,
            Shelf::Reading => &self.reading,
            Shelf::Finished => &self.finished,
        }
    }

    pub fn shelf_mut(&mut self, shelf: Shelf) -> &mut Vec<Book> {
        match shelf {
            Shelf::ToRead => &mut self.to_read,
            Shelf::Reading => &mut self.reading,
            Shelf::Finished => &mut self.finished,
        }
    }

    /// Finds the first book with `id`, scanning shelves in [`Shelf::ALL`] order.
    ///
    /// Returns the shelf and the index within it.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<(Shelf, usize)> {
        Shelf::ALL.into_iter().find_map(|shelf| {
            self.shelf(shelf)
                .iter()
                .position(|book| book.id == id)
                .map(|index| (shelf, index))
        })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Total number of books across all shelves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_read.len() + self.reading.len() + self.finished.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shelf_names_parse_case_insensitively() {
        assert_eq!("toRead".parse::<Shelf>().unwrap(), Shelf::ToRead);
        assert_eq!("TO-READ".parse::<Shelf>().unwrap(), Shelf::ToRead);
        assert_eq!("to_read".parse::<Shelf>().unwrap(), Shelf::ToRead);
        assert_eq!(" Reading ".parse::<Shelf>().unwrap(), Shelf::Reading);
        assert_eq!("finished".parse::<Shelf>().unwrap(), Shelf::Finished);
        assert!("someday".parse::<Shelf>().is_err());
    }

    #[test]
    fn locate_scans_shelves_in_order() {
        let mut library = Library::default();
        library.finished.push(Book::new("dup", "Later copy"));
        library.reading.push(Book::new("dup", "Earlier copy"));
        library.reading.push(Book::new("solo", "Solo"));

        assert_eq!(library.locate("dup"), Some((Shelf::Reading, 0)));
        assert_eq!(library.locate("solo"), Some((Shelf::Reading, 1)));
        assert_eq!(library.locate("missing"), None);
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn persisted_shape_uses_camel_case() {
        let mut library = Library::default();
        let mut book = Book::new("id-1", "Dune");
        book.page_count = 412;
        library.to_read.push(book);

        let json = serde_json::to_value(&library).unwrap();
        assert!(json.get("toRead").is_some());
        assert!(json.get("reading").is_some());
        assert!(json.get("finished").is_some());
        assert_eq!(json["toRead"][0]["pageCount"], 412);
        assert!(json["toRead"][0].get("downloadUrl").is_none());
        assert!(json["toRead"][0].get("addedAt").is_none());
    }

    #[test]
    fn legacy_documents_fill_missing_fields() {
        let json = r#"{
            "toRead": [{
                "id": "x",
                "title": "Old entry",
                "authors": ["A"],
                "thumbnail": "t",
                "description": "d",
                "categories": ["c"],
                "iaUrl": "https://archive.org/download/x/x.pdf",
                "downloads": 12
            }]
        }"#;

        let library: Library = serde_json::from_str(json).unwrap();
        let book = &library.to_read[0];
        assert_eq!(book.page_count, 0);
        assert_eq!(book.progress, 0);
        assert_eq!(
            book.download_url.as_deref(),
            Some("https://archive.org/download/x/x.pdf")
        );
        assert!(library.reading.is_empty());
        assert!(library.finished.is_empty());
    }

    #[test]
    fn card_only_entries_get_sentinels() {
        let book: Book = serde_json::from_str(r#"{"id": "g1", "progress": 10}"#).unwrap();
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR]);
        assert_eq!(book.thumbnail, PLACEHOLDER_THUMBNAIL);
        assert_eq!(book.description, NO_DESCRIPTION);
        assert_eq!(book.categories, vec![UNCATEGORIZED]);
        assert_eq!(book.progress, 10);
    }

    #[test]
    fn unusable_progress_and_notes_read_as_defaults() {
        let book: Book =
            serde_json::from_str(r#"{"id": "a", "progress": null, "notes": null}"#).unwrap();
        assert_eq!(book.progress, 0);
        assert!(book.notes.is_empty());

        let book: Book = serde_json::from_str(r#"{"id": "a", "progress": 42.6}"#).unwrap();
        assert_eq!(book.progress, 43);

        let book: Book = serde_json::from_str(r#"{"id": "a", "progress": 250}"#).unwrap();
        assert_eq!(book.progress, 100);
    }
}
