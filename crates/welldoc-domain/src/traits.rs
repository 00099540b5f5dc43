//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its collaborators.
//! Infrastructure implementations live in other crates.

use crate::{Category, Chunk, ChunkType};
use std::collections::BTreeSet;
use std::path::Path;

/// Trait for the document-to-text conversion engine
///
/// Implementations must tolerate unreadable or partial files by returning empty
/// text rather than failing; `Err` is reserved for the engine itself being
/// unavailable.
pub trait DocumentConverter {
    /// Error type for conversion operations
    type Error;

    /// Structured text of the first `max_pages` pages, one string per page
    fn structured_pages(&self, path: &Path, max_pages: usize) -> Result<Vec<String>, Self::Error>;

    /// Full raw text of the document, pages separated by form feed (`\x0c`)
    fn raw_text(&self, path: &Path) -> Result<String, Self::Error>;
}

/// Filter and ranking criteria for an index query
///
/// All present filters are combined with AND; `categories` is an in-set filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkQuery {
    /// Query text used for ranking
    pub text: String,

    /// Filter by well
    pub well_id: Option<String>,

    /// Filter by fragment kind
    pub chunk_type: Option<ChunkType>,

    /// Filter by category membership (chunks without a category never match)
    pub categories: Option<BTreeSet<Category>>,

    /// Filter by source document
    pub document_name: Option<String>,

    /// Maximum results to return
    pub limit: usize,
}

impl ChunkQuery {
    /// Whether a chunk passes every filter of this query
    pub fn matches(&self, chunk: &Chunk) -> bool {
        if let Some(well_id) = &self.well_id {
            if &chunk.well_id != well_id {
                return false;
            }
        }
        if let Some(chunk_type) = self.chunk_type {
            if chunk.chunk_type != chunk_type {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            match chunk.category {
                Some(c) if categories.contains(&c) => {}
                _ => return false,
            }
        }
        if let Some(document_name) = &self.document_name {
            if &chunk.document_name != document_name {
                return false;
            }
        }
        true
    }
}

/// A ranked query hit
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// The fragment with its metadata
    pub chunk: Chunk,

    /// Relevance score (higher is better)
    pub score: f64,
}

/// Trait for the chunk index (similarity store keyed by metadata filters)
pub trait ChunkIndex {
    /// Error type for index operations
    type Error;

    /// Add a fragment to the index
    fn write(&mut self, chunk: Chunk) -> Result<(), Self::Error>;

    /// Ranked fragments passing the query filters, at most `query.limit`
    fn query(&self, query: &ChunkQuery) -> Result<Vec<ScoredChunk>, Self::Error>;
}

/// Trait for the text generator (language model)
pub trait TextGenerator {
    /// Error type for generation
    type Error;

    /// Generate text from a system instruction and a user instruction
    fn generate(&self, system: &str, user: &str, temperature: f32) -> Result<String, Self::Error>;
}
