//! SQLite-backed chunk index and metadata record store

use crate::{scoring, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use welldoc_domain::traits::{ChunkIndex, ChunkQuery, ScoredChunk};
use welldoc_domain::{Category, Chunk, ChunkType, Document};

/// SQLite implementation of `ChunkIndex`
///
/// Metadata filters run in SQL; ranking runs in Rust over the filtered rows in
/// insertion order, so ties resolve the same way as in `MemoryIndex`.
///
/// # Thread Safety
///
/// The connection sits behind a mutex so one index can be shared with blocking
/// tasks through an `Arc`.
pub struct SqliteIndex {
    conn: Mutex<Connection>,
}

impl SqliteIndex {
    /// Open (or create) an index at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use welldoc_store::SqliteIndex;
    ///
    /// let index = SqliteIndex::new("welldoc.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Insert or replace the metadata record of a document
    pub fn save_document(&self, document: &Document) -> Result<(), StoreError> {
        let record = serde_json::to_string(document)?;
        self.conn()?.execute(
            "INSERT OR REPLACE INTO documents (well_id, filename, record) VALUES (?1, ?2, ?3)",
            params![&document.well_id, &document.filename, &record],
        )?;
        Ok(())
    }

    /// Load one metadata record
    pub fn get_document(&self, well_id: &str, filename: &str) -> Result<Option<Document>, StoreError> {
        let record: Option<String> = self
            .conn()?
            .query_row(
                "SELECT record FROM documents WHERE well_id = ?1 AND filename = ?2",
                params![well_id, filename],
                |row| row.get(0),
            )
            .optional()?;

        record
            .map(|r| serde_json::from_str(&r).map_err(StoreError::from))
            .transpose()
    }

    /// Load metadata records, optionally restricted to one well, ordered by well then filename
    pub fn load_documents(&self, well_id: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn()?;
        let mut sql = String::from("SELECT record FROM documents");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(well_id) = well_id {
            sql.push_str(" WHERE well_id = ?");
            params_vec.push(Box::new(well_id.to_string()));
        }
        sql.push_str(" ORDER BY well_id, filename");

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| b.as_ref()).collect();
        let records = stmt
            .query_map(params_refs.as_slice(), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        records
            .iter()
            .map(|r| serde_json::from_str(r).map_err(StoreError::from))
            .collect()
    }

    /// Number of indexed fragments
    pub fn chunk_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Remove every fragment of a well (before re-indexing it)
    pub fn clear_well(&self, well_id: &str) -> Result<usize, StoreError> {
        let removed = self
            .conn()?
            .execute("DELETE FROM chunks WHERE well_id = ?1", params![well_id])?;
        Ok(removed)
    }

    fn row_to_chunk(row: &rusqlite::Row<'_>) -> rusqlite::Result<(Chunk, String, Option<String>)> {
        let chunk_type: String = row.get(1)?;
        let category: Option<String> = row.get(6)?;
        let chunk = Chunk {
            text: row.get(0)?,
            chunk_type: ChunkType::Text,
            well_id: row.get(2)?,
            document_name: row.get(3)?,
            section_number: row.get(4)?,
            section_title: row.get(5)?,
            category: None,
            page: row.get::<_, i64>(7)? as u32,
        };
        Ok((chunk, chunk_type, category))
    }

    fn decode(raw: (Chunk, String, Option<String>)) -> Result<Chunk, StoreError> {
        let (mut chunk, chunk_type, category) = raw;
        chunk.chunk_type = ChunkType::parse(&chunk_type)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown chunk type: {}", chunk_type)))?;
        chunk.category = match category {
            Some(c) => Some(
                Category::parse(&c)
                    .ok_or_else(|| StoreError::InvalidData(format!("Unknown category: {}", c)))?,
            ),
            None => None,
        };
        Ok(chunk)
    }
}

impl ChunkIndex for SqliteIndex {
    type Error = StoreError;

    fn write(&mut self, chunk: Chunk) -> Result<(), Self::Error> {
        self.conn()?.execute(
            "INSERT INTO chunks (text, chunk_type, well_id, document_name, section_number, section_title, category, page)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &chunk.text,
                chunk.chunk_type.as_str(),
                &chunk.well_id,
                &chunk.document_name,
                &chunk.section_number,
                &chunk.section_title,
                chunk.category.map(|c| c.as_str()),
                chunk.page as i64,
            ],
        )?;
        Ok(())
    }

    fn query(&self, query: &ChunkQuery) -> Result<Vec<ScoredChunk>, Self::Error> {
        if let Some(categories) = &query.categories {
            if categories.is_empty() {
                return Ok(Vec::new());
            }
        }

        let mut sql = String::from(
            "SELECT text, chunk_type, well_id, document_name, section_number, section_title, category, page
             FROM chunks WHERE 1=1",
        );
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(well_id) = &query.well_id {
            sql.push_str(" AND well_id = ?");
            params_vec.push(Box::new(well_id.clone()));
        }

        if let Some(chunk_type) = query.chunk_type {
            sql.push_str(" AND chunk_type = ?");
            params_vec.push(Box::new(chunk_type.as_str()));
        }

        if let Some(document_name) = &query.document_name {
            sql.push_str(" AND document_name = ?");
            params_vec.push(Box::new(document_name.clone()));
        }

        if let Some(categories) = &query.categories {
            let placeholders = vec!["?"; categories.len()].join(", ");
            sql.push_str(&format!(" AND category IN ({})", placeholders));
            for category in categories {
                params_vec.push(Box::new(category.as_str()));
            }
        }

        sql.push_str(" ORDER BY seq");

        let rows = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare(&sql)?;
            let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| b.as_ref()).collect();
            let raw = stmt
                .query_map(params_refs.as_slice(), Self::row_to_chunk)?
                .collect::<Result<Vec<_>, _>>()?;
            raw
        };

        let chunks = rows
            .into_iter()
            .map(Self::decode)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(scoring::rank(&query.text, chunks.iter(), query.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, category: Option<Category>) -> Chunk {
        Chunk {
            text: text.to_string(),
            chunk_type: ChunkType::Text,
            well_id: "W1".to_string(),
            document_name: "EOWR.pdf".to_string(),
            section_number: "4".to_string(),
            section_title: "Casing".to_string(),
            category,
            page: 3,
        }
    }

    #[test]
    fn test_create_in_memory() {
        let index = SqliteIndex::new(":memory:").unwrap();
        assert_eq!(index.chunk_count().unwrap(), 0);
    }

    #[test]
    fn test_write_and_query_round_trip_metadata() {
        let mut index = SqliteIndex::new(":memory:").unwrap();
        index.write(chunk("casing shoe", Some(Category::Casing))).unwrap();
        index.write(chunk("loose text", None)).unwrap();

        let hits = index
            .query(&ChunkQuery {
                text: "casing".to_string(),
                limit: 5,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.category, Some(Category::Casing));
        assert_eq!(hits[1].chunk.category, None);
        assert_eq!(hits[0].chunk.page, 3);
    }

    #[test]
    fn test_empty_category_set_matches_nothing() {
        let mut index = SqliteIndex::new(":memory:").unwrap();
        index.write(chunk("casing", Some(Category::Casing))).unwrap();
        let hits = index
            .query(&ChunkQuery {
                categories: Some(Default::default()),
                limit: 5,
                ..Default::default()
            })
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_clear_well() {
        let mut index = SqliteIndex::new(":memory:").unwrap();
        index.write(chunk("a", None)).unwrap();
        index.write(chunk("b", None)).unwrap();
        assert_eq!(index.clear_well("W1").unwrap(), 2);
        assert_eq!(index.chunk_count().unwrap(), 0);
    }
}
