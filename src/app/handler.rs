//! Command execution.
//!
//! [`handle_command`] is the single dispatch point between the parsed command line
//! and the rest of the crate. Each command runs against the [`App`] it is given and
//! produces a [`View`] for the renderer; nothing here writes to the terminal.
//!
//! Catalog failures never surface as errors. A search that fails looks exactly like
//! a search that found nothing. Storage failures do propagate.

use crate::app::command::{Command, Listing};
use crate::app::state::App;
use crate::domain::error::{Result, ShelfmarkError};
use crate::domain::Shelf;
use crate::storage::library::COMPLETE;
use crate::storage::{BlobStore, LibraryStats};
use crate::ui::View;
use tracing::Instrument;

/// Runs `command` and returns what should be shown.
///
/// # Errors
///
/// Returns an error if the library cannot be read or written, or if a request
/// refers to something that cannot exist (such as result 5 of a 3-result search).
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> shelfmark::Result<()> {
/// use shelfmark::{handle_command, initialize, Command, Config};
///
/// let mut app = initialize(&Config::default())?;
/// let view = handle_command(&mut app, Command::Stats).await?;
/// println!("{}", shelfmark::ui::render(&view));
/// # Ok(())
/// # }
/// ```
pub async fn handle_command<S: BlobStore>(app: &mut App<S>, command: Command) -> Result<View> {
    match command {
        Command::Search { query, filter } => {
            let books = app
                .provider
                .search(&query, filter)
                .instrument(tracing::info_span!("search", query = %query, filter = %filter))
                .await;
            Ok(View::SearchResults { query, books })
        }

        Command::Recommend { genre } => {
            let library = app.store.load()?;
            let recommendations = app.engine.recommend(&genre, &library.finished).await;
            Ok(View::Recommendations {
                genre,
                recommendations,
            })
        }

        Command::Add {
            shelf,
            listing,
            pick,
        } => add(app, shelf, listing, pick).await,

        Command::Move { id, from, to } => {
            if app.store.move_book(&id, from, to)? {
                Ok(View::Notice(format!("Moved {id} from {} to {}", from.label(), to.label())))
            } else {
                Ok(View::Notice(format!(
                    "Nothing changed: no book {id} on the {} shelf",
                    from.label()
                )))
            }
        }

        Command::Progress {
            id,
            progress,
            notes,
        } => {
            let library = app.store.load()?;
            let Some((shelf, index)) = library.locate(&id) else {
                return Ok(View::Notice(format!("Nothing changed: no book {id} on any shelf")));
            };
            let book = &library.shelf(shelf)[index];
            let notes = notes.unwrap_or_else(|| book.notes.clone());
            let title = book.title.clone();

            app.store.update_progress(&id, progress, &notes)?;

            let progress = progress.min(COMPLETE);
            if progress == COMPLETE && shelf != Shelf::Finished {
                Ok(View::Notice(format!(
                    "'{title}' is at {progress}% and moved to {}",
                    Shelf::Finished.label()
                )))
            } else {
                Ok(View::Notice(format!("'{title}' is at {progress}%")))
            }
        }

        Command::List { shelf } => Ok(View::Shelves {
            library: app.store.load()?,
            shelf,
        }),

        Command::Stats => Ok(View::Stats(LibraryStats::from_library(&app.store.load()?))),

        Command::Help => Ok(View::Help),
    }
}

/// Rebuilds the list described by `listing` and shelves entry number `pick`.
async fn add<S: BlobStore>(
    app: &mut App<S>,
    shelf: Shelf,
    listing: Listing,
    pick: usize,
) -> Result<View> {
    let span = tracing::info_span!("add", listing = ?listing, shelf = %shelf, pick);

    let (results, label) = match &listing {
        Listing::Search { query, filter } => {
            let books = app.provider.search(query, *filter).instrument(span).await;
            (books, format!("\"{query}\""))
        }
        Listing::Recommend { genre } => {
            let library = app.store.load()?;
            let recommendations = app
                .engine
                .recommend(genre, &library.finished)
                .instrument(span)
                .await;
            let books = recommendations.into_iter().map(|r| r.book).collect();
            (books, format!("genre: \"{genre}\""))
        }
    };

    if results.is_empty() {
        return Ok(View::Notice(format!("No results found for {label}")));
    }
    let count = results.len();
    let Some(book) = results.into_iter().nth(pick.saturating_sub(1)) else {
        return Err(ShelfmarkError::Command(format!(
            "only {count} results for {label}, cannot pick {pick}"
        )));
    };

    let library = app.store.load()?;
    if let Some((existing, _)) = library.locate(&book.id) {
        return Ok(View::Notice(format!(
            "'{}' is already on the {} shelf",
            book.title,
            existing.label()
        )));
    }

    let title = book.title.clone();
    app.store.add_book(book, shelf)?;
    Ok(View::Notice(format!("Added '{title}' to {}", shelf.label())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;
    use crate::provider::{BookSearchProvider, SearchFilter};
    use crate::storage::{LibraryStore, MemoryBlobStore};
    use std::sync::Arc;

    struct Fixed(Vec<Book>);

    #[async_trait::async_trait]
    impl BookSearchProvider for Fixed {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str, _filter: SearchFilter) -> Vec<Book> {
            self.0.clone()
        }

        async fn search_by_category(&self, _genre: &str) -> Vec<Book> {
            self.0.clone()
        }
    }

    fn app(books: Vec<Book>) -> App<MemoryBlobStore> {
        App::new(LibraryStore::new(MemoryBlobStore::default()), Arc::new(Fixed(books)))
    }

    fn search_for(query: &str) -> Listing {
        Listing::Search {
            query: query.to_string(),
            filter: SearchFilter::All,
        }
    }

    fn notice(view: View) -> String {
        match view {
            View::Notice(text) => text,
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_picks_requested_result() {
        let mut app = app(vec![Book::new("a", "First"), Book::new("b", "Second")]);

        let text = notice(
            handle_command(
                &mut app,
                Command::Add {
                    shelf: Shelf::Reading,
                    listing: search_for("q"),
                    pick: 2,
                },
            )
            .await
            .unwrap(),
        );
        assert_eq!(text, "Added 'Second' to Currently Reading");
        assert_eq!(app.store().load().unwrap().reading[0].id, "b");
    }

    #[tokio::test]
    async fn add_out_of_range_pick_is_an_error() {
        let mut app = app(vec![Book::new("a", "First")]);
        let result = handle_command(
            &mut app,
            Command::Add {
                shelf: Shelf::ToRead,
                listing: search_for("q"),
                pick: 3,
            },
        )
        .await;
        assert!(matches!(result, Err(ShelfmarkError::Command(_))));
        assert_eq!(app.store().backend().write_count(), 0);
    }

    #[tokio::test]
    async fn add_from_an_empty_genre_writes_nothing() {
        let mut app = app(Vec::new());
        let text = notice(
            handle_command(
                &mut app,
                Command::Add {
                    shelf: Shelf::ToRead,
                    listing: Listing::Recommend {
                        genre: "cyberpunk".into(),
                    },
                    pick: 1,
                },
            )
            .await
            .unwrap(),
        );
        assert_eq!(text, "No results found for genre: \"cyberpunk\"");
        assert_eq!(app.store().backend().write_count(), 0);
    }

    #[tokio::test]
    async fn progress_without_notes_keeps_existing_notes() {
        let mut app = app(Vec::new());
        app.store.add_book(Book::new("a", "Dune"), Shelf::Reading).unwrap();
        app.store.update_progress("a", 10, "spice").unwrap();

        let text = notice(
            handle_command(
                &mut app,
                Command::Progress {
                    id: "a".into(),
                    progress: 30,
                    notes: None,
                },
            )
            .await
            .unwrap(),
        );
        assert_eq!(text, "'Dune' is at 30%");
        let library = app.store().load().unwrap();
        assert_eq!(library.reading[0].notes, "spice");
        assert_eq!(library.reading[0].progress, 30);
    }

    #[tokio::test]
    async fn unknown_book_progress_changes_nothing() {
        let mut app = app(Vec::new());
        let text = notice(
            handle_command(
                &mut app,
                Command::Progress {
                    id: "missing".into(),
                    progress: 50,
                    notes: None,
                },
            )
            .await
            .unwrap(),
        );
        assert!(text.starts_with("Nothing changed"));
        assert_eq!(app.store().backend().write_count(), 0);
    }
}
