//! Storage layer for the persisted library.
//!
//! The whole library lives in one JSON document behind a minimal key-value
//! [`BlobStore`]. [`LibraryStore`] implements the shelf operations on top of it.
//!
//! # Modules
//!
//! - `backend`: Blob store trait
//! - `file`: Directory-backed blob store with atomic writes
//! - `memory`: In-memory blob store
//! - `library`: Shelf operations and persistence
//! - `stats`: Shelf counts and completion rate

pub mod backend;
pub mod file;
pub mod library;
pub mod memory;
pub mod stats;

pub use backend::BlobStore;
pub use file::FileBlobStore;
pub use library::{LibraryStore, LIBRARY_KEY};
pub use memory::MemoryBlobStore;
pub use stats::LibraryStats;
