//! Retrievable fragments

use crate::{Category, Provenance};
use serde::{Deserialize, Serialize};

/// Kind of content a chunk holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    /// Running prose
    Text,
    /// Tabular rows
    Table,
}

impl ChunkType {
    /// Get the chunk type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Text => "text",
            ChunkType::Table => "table",
        }
    }

    /// Parse a chunk type from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(ChunkType::Text),
            "table" => Some(ChunkType::Table),
            _ => None,
        }
    }
}

/// A fragment of a document section, as written to and read from the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Fragment content
    pub text: String,

    /// Prose or table
    pub chunk_type: ChunkType,

    /// Owning well
    pub well_id: String,

    /// File name of the source document
    pub document_name: String,

    /// Numeral of the TOC section the fragment came from
    pub section_number: String,

    /// Title of the TOC section the fragment came from
    pub section_title: String,

    /// Category of that section, if it was classified
    pub category: Option<Category>,

    /// Page the fragment starts on
    pub page: u32,
}

impl Chunk {
    /// Citation data for this fragment
    pub fn provenance(&self) -> Provenance {
        Provenance {
            document_name: self.document_name.clone(),
            section_number: self.section_number.clone(),
            section_title: self.section_title.clone(),
            category: self.category,
            page: self.page,
        }
    }

    /// Whitespace-delimited word count of the fragment
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
