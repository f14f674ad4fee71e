//! Plain-text presentation layer.
//!
//! ```text
//! Command → handle_command → View → render → String → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: The [`View`] enum produced by command execution
//! - [`renderer`]: Turns a [`View`] into printable text
//! - [`format`]: Small text helpers (truncation, progress bars)

pub mod format;
pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::View;
