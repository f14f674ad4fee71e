//! Application layer: command parsing and execution.
//!
//! ```text
//! argv → Invocation::parse → Command → handle_command(&mut App) → View → ui::render
//! ```
//!
//! # Modules
//!
//! - [`command`]: Command-line grammar and the [`Command`] type
//! - [`handler`]: Executes a command against the application
//! - [`state`]: The explicitly wired [`App`] (store, provider, engine)

pub mod command;
pub mod handler;
pub mod state;

pub use command::{Command, Invocation, Listing, USAGE};
pub use handler::handle_command;
pub use state::App;
