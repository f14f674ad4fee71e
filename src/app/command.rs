//! Command-line parsing.
//!
//! Arguments are split into positionals and `--option value` (or `--option=value`)
//! pairs, then matched against the command table:
//!
//! ```text
//! shelfmark search <query…> [--filter all|title|author]
//! shelfmark recommend <genre…>
//! shelfmark add <shelf> <query…> [--filter all|title|author] [--pick N]
//! shelfmark add <shelf> --genre <genre…> [--pick N]
//! shelfmark move <id> <from> <to>
//! shelfmark progress <id> <0-100> [--notes text]
//! shelfmark list [shelf]
//! shelfmark stats
//! shelfmark help
//! ```
//!
//! `--config <path>` is accepted with any command.

use crate::domain::error::{Result, ShelfmarkError};
use crate::domain::Shelf;
use crate::provider::SearchFilter;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Usage text shown by `help` and after invalid input.
pub const USAGE: &str = "\
Usage: shelfmark [--config <path>] <command> [args]

Commands:
  search <query…> [--filter all|title|author]   Search the catalogs
  recommend <genre…>                            Recommend books for a genre
  add <shelf> <query…> [--filter F] [--pick N]  Search and shelve result N (default 1)
  add <shelf> --genre <genre…> [--pick N]       Shelve recommendation N for a genre
  move <id> <from> <to>                         Move a book between shelves
  progress <id> <0-100> [--notes text]          Record reading progress
  list [shelf]                                  Show one or all shelves
  stats                                         Show reading statistics
  help                                          Show this message

Shelves: toRead, reading, finished";

/// Options that take a value.
const OPTIONS: [&str; 5] = ["config", "filter", "pick", "notes", "genre"];

/// The result list an `add` command picks from.
///
/// Uses the same arguments as the `search` or `recommend` command that showed the
/// list, so `--pick N` refers to the N-th entry the user saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Search { query: String, filter: SearchFilter },
    Recommend { genre: String },
}

/// A parsed user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search {
        query: String,
        filter: SearchFilter,
    },
    Recommend {
        genre: String,
    },
    /// Put entry number `pick` (1-based) of `listing` on `shelf`.
    Add {
        shelf: Shelf,
        listing: Listing,
        pick: usize,
    },
    Move {
        id: String,
        from: Shelf,
        to: Shelf,
    },
    /// Record progress; `notes: None` keeps the book's current notes.
    Progress {
        id: String,
        progress: u8,
        notes: Option<String>,
    },
    List {
        shelf: Option<Shelf>,
    },
    Stats,
    Help,
}

/// A command plus the global options that came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

impl Invocation {
    /// Parses the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::Command`] for unknown commands or options, missing
    /// arguments and malformed values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shelfmark::{Command, Invocation, Shelf};
    ///
    /// let args = ["move", "abc", "toRead", "reading"].map(String::from);
    /// let invocation = Invocation::parse(args)?;
    /// assert_eq!(
    ///     invocation.command,
    ///     Command::Move { id: "abc".into(), from: Shelf::ToRead, to: Shelf::Reading }
    /// );
    /// # Ok::<(), shelfmark::ShelfmarkError>(())
    /// ```
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let (positionals, mut options) = split_args(args)?;
        let config_path = options.remove("config").map(PathBuf::from);
        let command = parse_command(&positionals, &mut options)?;

        if let Some(unused) = options.keys().next() {
            return Err(ShelfmarkError::Command(format!(
                "option --{unused} does not apply to this command"
            )));
        }

        Ok(Self {
            config_path,
            command,
        })
    }
}

fn split_args<I>(args: I) -> Result<(Vec<String>, BTreeMap<String, String>)>
where
    I: IntoIterator<Item = String>,
{
    let mut positionals = Vec::new();
    let mut options = BTreeMap::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            positionals.insert(0, "help".to_string());
            continue;
        }

        let Some(option) = arg.strip_prefix("--") else {
            positionals.push(arg);
            continue;
        };

        let (name, inline_value) = match option.split_once('=') {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (option.to_string(), None),
        };
        if !OPTIONS.contains(&name.as_str()) {
            return Err(ShelfmarkError::Command(format!("unknown option --{name}")));
        }

        let value = match inline_value {
            Some(value) => value,
            None => args
                .next()
                .ok_or_else(|| ShelfmarkError::Command(format!("option --{name} needs a value")))?,
        };
        options.insert(name, value);
    }

    Ok((positionals, options))
}

fn joined(words: &[String], what: &str) -> Result<String> {
    let text = words.join(" ").trim().to_string();
    if text.is_empty() {
        return Err(ShelfmarkError::Command(format!("missing {what}")));
    }
    Ok(text)
}

fn parse_progress(value: &str) -> Result<u8> {
    value
        .trim()
        .trim_end_matches('%')
        .parse::<u8>()
        .ok()
        .filter(|p| *p <= 100)
        .ok_or_else(|| {
            ShelfmarkError::Command(format!("progress must be a number from 0 to 100, got '{value}'"))
        })
}

fn take_filter(options: &mut BTreeMap<String, String>) -> Result<SearchFilter> {
    options
        .remove("filter")
        .map_or(Ok(SearchFilter::All), |f| f.parse())
}

fn parse_command(args: &[String], options: &mut BTreeMap<String, String>) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match name.as_str() {
        "search" => Ok(Command::Search {
            query: joined(rest, "search query")?,
            filter: take_filter(options)?,
        }),
        "recommend" => Ok(Command::Recommend {
            genre: joined(rest, "genre")?,
        }),
        "add" => {
            let (shelf, query) = rest
                .split_first()
                .ok_or_else(|| ShelfmarkError::Command("missing shelf".to_string()))?;
            let pick = match options.remove("pick") {
                Some(pick) => pick
                    .parse::<usize>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .ok_or_else(|| {
                        ShelfmarkError::Command(format!("--pick must be a positive number, got '{pick}'"))
                    })?,
                None => 1,
            };
            let listing = match options.remove("genre") {
                // `--genre science fiction` leaves "fiction" as a positional word.
                Some(genre) => {
                    if options.contains_key("filter") {
                        return Err(ShelfmarkError::Command(
                            "--filter cannot be combined with --genre".to_string(),
                        ));
                    }
                    let mut words = vec![genre];
                    words.extend(query.iter().cloned());
                    Listing::Recommend {
                        genre: joined(&words, "genre")?,
                    }
                }
                None => Listing::Search {
                    query: joined(query, "search query")?,
                    filter: take_filter(options)?,
                },
            };
            Ok(Command::Add {
                shelf: shelf.parse()?,
                listing,
                pick,
            })
        }
        "move" => match rest {
            [id, from, to] => Ok(Command::Move {
                id: id.clone(),
                from: from.parse()?,
                to: to.parse()?,
            }),
            _ => Err(ShelfmarkError::Command(
                "move needs <id> <from> <to>".to_string(),
            )),
        },
        "progress" => match rest {
            [id, progress] => Ok(Command::Progress {
                id: id.clone(),
                progress: parse_progress(progress)?,
                notes: options.remove("notes"),
            }),
            _ => Err(ShelfmarkError::Command(
                "progress needs <id> <0-100>".to_string(),
            )),
        },
        "list" => match rest {
            [] => Ok(Command::List { shelf: None }),
            [shelf] => Ok(Command::List {
                shelf: Some(shelf.parse()?),
            }),
            _ => Err(ShelfmarkError::Command("list takes at most one shelf".to_string())),
        },
        "stats" => Ok(Command::Stats),
        "help" => {
            options.clear();
            Ok(Command::Help)
        }
        other => Err(ShelfmarkError::Command(format!("unknown command '{other}'"))),
    }
}
