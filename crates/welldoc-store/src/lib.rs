//! Welldoc Storage Layer
//!
//! Implements the `ChunkIndex` trait and persists per-document metadata records.
//!
//! # Architecture
//!
//! - `MemoryIndex`: Vec-backed index for tests and one-shot runs
//! - `SqliteIndex`: SQLite tables for chunks and metadata records
//! - Both rank hits by query-term overlap after applying the metadata filters;
//!   equal scores keep insertion order
//!
//! # Examples
//!
//! ```no_run
//! use welldoc_store::SqliteIndex;
//!
//! let index = SqliteIndex::new(":memory:").unwrap();
//! // Index is now ready for chunk and record operations
//! ```

#![warn(missing_docs)]

pub mod memory;
pub mod scoring;
pub mod sqlite;

use thiserror::Error;

pub use memory::MemoryIndex;
pub use sqlite::SqliteIndex;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Connection lock poisoned by a panicking writer
    #[error("Store lock poisoned")]
    LockPoisoned,
}
