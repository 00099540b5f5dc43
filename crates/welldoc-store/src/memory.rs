//! In-memory chunk index

use crate::{scoring, StoreError};
use welldoc_domain::traits::{ChunkIndex, ChunkQuery, ScoredChunk};
use welldoc_domain::Chunk;

/// Vec-backed `ChunkIndex`
///
/// Filters are applied with `ChunkQuery::matches`, survivors are ranked by
/// term overlap. Never fails; the error type only exists to share `StoreError`
/// with the SQLite index.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    chunks: Vec<Chunk>,
}

impl MemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed fragments
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<Chunk> for MemoryIndex {
    fn from_iter<T: IntoIterator<Item = Chunk>>(iter: T) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl ChunkIndex for MemoryIndex {
    type Error = StoreError;

    fn write(&mut self, chunk: Chunk) -> Result<(), Self::Error> {
        self.chunks.push(chunk);
        Ok(())
    }

    fn query(&self, query: &ChunkQuery) -> Result<Vec<ScoredChunk>, Self::Error> {
        let candidates = self.chunks.iter().filter(|c| query.matches(c));
        Ok(scoring::rank(&query.text, candidates, query.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use welldoc_domain::{Category, ChunkType};

    fn chunk(text: &str, chunk_type: ChunkType, category: Option<Category>) -> Chunk {
        Chunk {
            text: text.to_string(),
            chunk_type,
            well_id: "W1".to_string(),
            document_name: "EOWR.pdf".to_string(),
            section_number: "4".to_string(),
            section_title: "Casing".to_string(),
            category,
            page: 12,
        }
    }

    #[test]
    fn test_query_filters_then_ranks() {
        let mut index = MemoryIndex::new();
        index.write(chunk("casing shoe at 1200 m", ChunkType::Text, Some(Category::Casing))).unwrap();
        index.write(chunk("| size | depth |", ChunkType::Table, Some(Category::Casing))).unwrap();
        index.write(chunk("mud weight 1.2 sg", ChunkType::Text, Some(Category::DrillingOperations))).unwrap();

        let query = ChunkQuery {
            text: "casing shoe".to_string(),
            chunk_type: Some(ChunkType::Text),
            categories: Some([Category::Casing].into_iter().collect()),
            limit: 10,
            ..Default::default()
        };
        let hits = index.query(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.text, "casing shoe at 1200 m");
    }

    #[test]
    fn test_limit_zero_returns_nothing() {
        let index: MemoryIndex = vec![chunk("a", ChunkType::Text, None)].into_iter().collect();
        let hits = index.query(&ChunkQuery::default()).unwrap();
        assert!(hits.is_empty());
        assert_eq!(index.len(), 1);
    }
}
