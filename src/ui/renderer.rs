//! Renders a [`View`] to text.
//!
//! Output is plain UTF-8 without escape sequences so it can be piped or captured.
//! Each book is shown as a short card:
//!
//! ```text
//!  1. The Left Hand of Darkness
//!     Ursula K. Le Guin · 304 pages · Fiction, Science Fiction
//!     id: ol-12345 · pdf: https://archive.org/download/…
//!     A human envoy is sent to the planet Gethen…
//! ```

use crate::app::command::USAGE;
use crate::domain::{Book, Library, Shelf};
use crate::recommend::Recommendation;
use crate::storage::LibraryStats;
use crate::ui::format::{books, progress_bar, truncate};
use crate::ui::viewmodel::View;
use std::fmt::Write as _;

/// Characters of description shown per card.
const DESCRIPTION_CHARS: usize = 160;

/// Genres suggested when a recommendation search comes back empty.
const POPULAR_GENRES: &str = "fantasy, science fiction, mystery, romance, horror";

/// Renders `view` as printable text without a trailing newline.
///
/// # Example
///
/// ```rust
/// use shelfmark::ui::{render, View};
///
/// assert_eq!(render(&View::Notice("Saved".into())), "Saved");
/// ```
#[must_use]
pub fn render(view: &View) -> String {
    match view {
        View::SearchResults { query, books } => render_search(query, books),
        View::Recommendations {
            genre,
            recommendations,
        } => render_recommendations(genre, recommendations),
        View::Shelves { library, shelf } => render_shelves(library, *shelf),
        View::Stats(stats) => render_stats(stats),
        View::Notice(text) => text.clone(),
        View::Help => USAGE.to_string(),
    }
}

fn render_search(query: &str, results: &[Book]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{query}\"");
    }

    let mut out = format!("{} for \"{query}\"\n", books(results.len()));
    for (index, book) in results.iter().enumerate() {
        out.push('\n');
        push_card(&mut out, index + 1, book);
    }
    out.push_str("\nAdd one with: shelfmark add <shelf> <query> [--filter <F>] --pick <N>");
    out
}

fn render_recommendations(genre: &str, recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return format!(
            "No results found for genre: \"{genre}\"\n\
             Try another genre or check your spelling\n\
             Popular genres: {POPULAR_GENRES}"
        );
    }

    let mut out = format!("Recommended {genre} books\n");
    for (index, recommendation) in recommendations.iter().enumerate() {
        out.push('\n');
        push_card(&mut out, index + 1, &recommendation.book);
        let _ = writeln!(
            out,
            "    [score {}] {}",
            recommendation.score, recommendation.reason
        );
    }
    let _ = write!(
        out,
        "\nAdd one with: shelfmark add <shelf> --genre {genre} --pick <N>"
    );
    out
}

fn render_shelves(library: &Library, only: Option<Shelf>) -> String {
    let shelves: Vec<Shelf> = only.map_or_else(|| Shelf::ALL.to_vec(), |shelf| vec![shelf]);

    let mut sections = Vec::with_capacity(shelves.len());
    for shelf in shelves {
        let entries = library.shelf(shelf);
        let mut section = format!("{} ({})\n", shelf.label(), books(entries.len()));

        if entries.is_empty() {
            section.push_str("  (empty)\n");
        }
        for book in entries {
            let _ = writeln!(
                section,
                "  {} {:>3}%  {} · {}  [{}]",
                progress_bar(book.progress),
                book.progress,
                book.title,
                book.author_line(),
                book.id
            );
            if !book.notes.is_empty() {
                let _ = writeln!(section, "        notes: {}", truncate(&book.notes, DESCRIPTION_CHARS));
            }
        }
        sections.push(section.trim_end().to_string());
    }
    sections.join("\n\n")
}

fn render_stats(stats: &LibraryStats) -> String {
    format!(
        "Total Books: {}\nCurrently Reading: {}\nCompletion Rate: {:.1}%",
        stats.total, stats.reading, stats.completion_rate
    )
}

fn push_card(out: &mut String, number: usize, book: &Book) {
    let _ = writeln!(out, "{number:>2}. {}", book.title);

    let mut details = vec![book.author_line()];
    if book.page_count > 0 {
        details.push(format!("{} pages", book.page_count));
    }
    details.push(book.categories.join(", "));
    let _ = writeln!(out, "    {}", details.join(" · "));

    match &book.download_url {
        Some(url) => {
            let _ = writeln!(out, "    id: {} · pdf: {url}", book.id);
        }
        None => {
            let _ = writeln!(out, "    id: {}", book.id);
        }
    }
    let _ = writeln!(out, "    {}", truncate(&book.description, DESCRIPTION_CHARS));
}
