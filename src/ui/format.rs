//! Text helpers shared by the renderers.
//!
//! All widths are counted in `char`s, not bytes, so titles and descriptions in any
//! script are cut on character boundaries.

/// Number of cells in a progress bar.
pub const BAR_CELLS: usize = 10;

/// Cuts `text` to at most `max_chars` characters, ending in `…` when shortened.
///
/// Whitespace runs (including newlines from catalog descriptions) are collapsed to
/// single spaces first.
///
/// # Examples
///
/// ```
/// use shelfmark::ui::format::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("a longer sentence", 8), "a longe…");
/// assert_eq!(truncate("line one\n\nline two", 40), "line one line two");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Renders `progress` percent as a fixed-width bar.
///
/// # Examples
///
/// ```
/// use shelfmark::ui::format::progress_bar;
///
/// assert_eq!(progress_bar(0), "[----------]");
/// assert_eq!(progress_bar(45), "[####------]");
/// assert_eq!(progress_bar(100), "[##########]");
/// ```
#[must_use]
pub fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_CELLS / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

/// Returns `1 book` / `3 books` style counts.
#[must_use]
pub fn books(count: usize) -> String {
    if count == 1 {
        "1 book".to_string()
    } else {
        format!("{count} books")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("ééééé", 5), "ééééé");
        assert_eq!(truncate("éééééé", 5), "éééé…");
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(200), progress_bar(100));
        assert_eq!(progress_bar(9), "[----------]");
        assert_eq!(progress_bar(10), "[#---------]");
    }

    #[test]
    fn book_counts() {
        assert_eq!(books(0), "0 books");
        assert_eq!(books(1), "1 book");
    }
}
