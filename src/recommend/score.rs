//! Recommendation scoring, reasons and ranking.
//!
//! A candidate earns points from four independent rules:
//!
//! | rule                | points | condition                                            |
//! |---------------------|--------|------------------------------------------------------|
//! | genre match         | 5      | a category contains the genre (case-insensitive)     |
//! | rich description    | 2      | description longer than 200 characters               |
//! | length affinity     | 2      | page count within 100 of the finished-shelf average  |
//! | author familiarity  | 3      | shares an author with some finished book             |
//!
//! The reason shown next to a recommendation is computed separately and uses a
//! slightly different rule set: it mentions the genre, the book's length class and a
//! rich description, but never author familiarity.

use super::types::Recommendation;
use crate::domain::Book;

pub const GENRE_MATCH_POINTS: u32 = 5;
pub const RICH_DESCRIPTION_POINTS: u32 = 2;
pub const LENGTH_AFFINITY_POINTS: u32 = 2;
pub const FAMILIAR_AUTHOR_POINTS: u32 = 3;

/// Descriptions longer than this many characters count as rich.
pub const RICH_DESCRIPTION_CHARS: usize = 200;

/// Maximum page-count distance (exclusive) for length affinity.
pub const LENGTH_TOLERANCE_PAGES: u32 = 100;

/// Average assumed when nothing has been finished yet.
pub const DEFAULT_AVERAGE_PAGES: u32 = 300;

/// Books longer than this are an "Epic read".
pub const EPIC_READ_PAGES: u32 = 400;

/// Books shorter than this are a "Quick read".
pub const QUICK_READ_PAGES: u32 = 200;

/// Length of a ranked recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 10;

const REASON_SEPARATOR: &str = " • ";

/// Whether any of the book's categories contains `genre`, ignoring case.
#[must_use]
pub fn matches_genre(book: &Book, genre: &str) -> bool {
    let genre = genre.to_lowercase();
    book.categories
        .iter()
        .any(|category| category.to_lowercase().contains(&genre))
}

#[must_use]
pub fn has_rich_description(book: &Book) -> bool {
    book.description.chars().count() > RICH_DESCRIPTION_CHARS
}

/// Rounded mean page count of `finished`, or [`DEFAULT_AVERAGE_PAGES`] if empty.
///
/// Unknown page counts are stored as 0 and pull the average down.
///
/// # Examples
///
/// ```
/// use shelfmark::domain::Book;
/// use shelfmark::recommend::score::average_page_count;
///
/// assert_eq!(average_page_count(&[]), 300);
///
/// let mut a = Book::new("a", "A");
/// a.page_count = 100;
/// let mut b = Book::new("b", "B");
/// b.page_count = 251;
/// assert_eq!(average_page_count(&[a, b]), 176);
/// ```
#[must_use]
pub fn average_page_count(finished: &[Book]) -> u32 {
    if finished.is_empty() {
        return DEFAULT_AVERAGE_PAGES;
    }

    let total: u64 = finished.iter().map(|book| u64::from(book.page_count)).sum();
    let count = finished.len() as u64;
    // Round half up.
    let mean = (total * 2 + count) / (count * 2);
    u32::try_from(mean).unwrap_or(u32::MAX)
}

fn has_familiar_author(book: &Book, finished: &[Book]) -> bool {
    finished.iter().any(|done| {
        done.authors
            .iter()
            .any(|author| book.authors.contains(author))
    })
}

fn score_with_average(book: &Book, finished: &[Book], genre: &str, average_pages: u32) -> u32 {
    let mut score = 0;

    if matches_genre(book, genre) {
        score += GENRE_MATCH_POINTS;
    }
    if has_rich_description(book) {
        score += RICH_DESCRIPTION_POINTS;
    }
    if book.page_count > 0 && book.page_count.abs_diff(average_pages) < LENGTH_TOLERANCE_PAGES {
        score += LENGTH_AFFINITY_POINTS;
    }
    if has_familiar_author(book, finished) {
        score += FAMILIAR_AUTHOR_POINTS;
    }

    score
}

/// Scores `book` for `genre` against the user's finished books.
///
/// A book with an unknown page count (0) never earns length affinity.
#[must_use]
pub fn score(book: &Book, finished: &[Book], genre: &str) -> u32 {
    score_with_average(book, finished, genre, average_page_count(finished))
}

/// Human-readable justification for recommending `book`.
///
/// # Examples
///
/// ```
/// use shelfmark::domain::Book;
/// use shelfmark::recommend::score::reason;
///
/// let mut book = Book::new("a", "A");
/// book.categories = vec!["Epic Fantasy".to_string()];
/// book.page_count = 812;
/// assert_eq!(reason(&book, "fantasy"), "Matches fantasy genre • Epic read");
///
/// book.categories = vec!["Poetry".to_string()];
/// book.page_count = 300;
/// assert_eq!(reason(&book, "fantasy"), "Recommended fantasy book");
/// ```
#[must_use]
pub fn reason(book: &Book, genre: &str) -> String {
    let mut reasons = Vec::new();

    if matches_genre(book, genre) {
        reasons.push(format!("Matches {genre} genre"));
    }

    if book.page_count > EPIC_READ_PAGES {
        reasons.push("Epic read".to_string());
    } else if book.page_count < QUICK_READ_PAGES {
        reasons.push("Quick read".to_string());
    }

    if has_rich_description(book) {
        reasons.push("Detailed story".to_string());
    }

    if reasons.is_empty() {
        format!("Recommended {genre} book")
    } else {
        reasons.join(REASON_SEPARATOR)
    }
}

/// Scores, sorts and annotates `candidates`, keeping the best [`MAX_RECOMMENDATIONS`].
///
/// The sort is stable: equally scored candidates keep their input order.
#[must_use]
pub fn rank(candidates: Vec<Book>, finished: &[Book], genre: &str) -> Vec<Recommendation> {
    let average_pages = average_page_count(finished);

    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .map(|book| {
            let score = score_with_average(&book, finished, genre, average_pages);
            let reason = reason(&book, genre);
            Recommendation { book, score, reason }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, categories: &[&str], pages: u32, description_len: usize) -> Book {
        let mut book = Book::new(id, id);
        book.categories = categories.iter().map(ToString::to_string).collect();
        book.page_count = pages;
        book.description = "x".repeat(description_len);
        book
    }

    fn finished_by(author: &str, pages: u32) -> Book {
        let mut book = Book::new(format!("done-{author}"), "done");
        book.authors = vec![author.to_string()];
        book.page_count = pages;
        book
    }

    #[test]
    fn all_four_rules_score_twelve() {
        let finished = vec![finished_by("Ursula K. Le Guin", 280)];
        let mut candidate = book("c", &["Fantasy"], 300, 250);
        candidate.authors = vec!["Ursula K. Le Guin".to_string()];

        assert_eq!(score(&candidate, &finished, "fantasy"), 12);
    }

    #[test]
    fn genre_match_is_case_insensitive_substring() {
        let candidate = book("c", &["Juvenile Fiction / FANTASY & Magic"], 0, 0);
        assert_eq!(score(&candidate, &[], "Fantasy"), GENRE_MATCH_POINTS);

        let scifi = book("s", &["Science Fiction"], 0, 0);
        assert_eq!(score(&scifi, &[], "fantasy"), 0);
    }

    #[test]
    fn description_must_exceed_threshold() {
        assert_eq!(score(&book("c", &["x"], 0, 200), &[], "y"), 0);
        assert_eq!(score(&book("c", &["x"], 0, 201), &[], "y"), RICH_DESCRIPTION_POINTS);
    }

    #[test]
    fn empty_history_defaults_average_to_300() {
        assert_eq!(score(&book("c", &["x"], 350, 0), &[], "y"), LENGTH_AFFINITY_POINTS);
        assert_eq!(score(&book("c", &["x"], 201, 0), &[], "y"), LENGTH_AFFINITY_POINTS);
        assert_eq!(score(&book("c", &["x"], 400, 0), &[], "y"), 0);
        assert_eq!(score(&book("c", &["x"], 200, 0), &[], "y"), 0);
    }

    #[test]
    fn unknown_page_count_earns_no_length_points() {
        let finished = vec![finished_by("a", 0), finished_by("b", 60)];
        assert_eq!(average_page_count(&finished), 30);
        assert_eq!(score(&book("c", &["x"], 0, 0), &finished, "y"), 0);
    }

    #[test]
    fn familiar_author_requires_exact_match() {
        let finished = vec![finished_by("Terry Pratchett", 0)];

        let mut same = book("c", &["x"], 0, 0);
        same.authors = vec!["Neil Gaiman".to_string(), "Terry Pratchett".to_string()];
        assert_eq!(score(&same, &finished, "y"), FAMILIAR_AUTHOR_POINTS);

        let mut different_case = book("d", &["x"], 0, 0);
        different_case.authors = vec!["terry pratchett".to_string()];
        assert_eq!(score(&different_case, &finished, "y"), 0);
    }

    #[test]
    fn reason_fragments_in_order() {
        let candidate = book("c", &["Fantasy"], 120, 300);
        assert_eq!(
            reason(&candidate, "fantasy"),
            "Matches fantasy genre • Quick read • Detailed story"
        );
    }

    #[test]
    fn reason_ignores_mid_length_and_authors() {
        let mut candidate = book("c", &["Poetry"], 300, 10);
        candidate.authors = vec!["Known".to_string()];
        assert_eq!(reason(&candidate, "horror"), "Recommended horror book");
    }

    #[test]
    fn rank_is_stable_sorted_and_truncated() {
        let mut candidates: Vec<Book> = (0..12)
            .map(|i| book(&format!("plain-{i}"), &["Other"], 0, 0))
            .collect();
        candidates.insert(5, book("genre", &["Mystery"], 0, 0));
        candidates.insert(9, book("rich", &["Other"], 0, 500));

        let ranked = rank(candidates, &[], "mystery");

        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
        assert_eq!(ranked[0].book.id, "genre");
        assert_eq!(ranked[0].score, GENRE_MATCH_POINTS);
        assert_eq!(ranked[1].book.id, "rich");
        let tail: Vec<_> = ranked[2..].iter().map(|r| r.book.id.as_str()).collect();
        assert_eq!(
            tail,
            ["plain-0", "plain-1", "plain-2", "plain-3", "plain-4", "plain-5", "plain-6", "plain-7"]
        );
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
