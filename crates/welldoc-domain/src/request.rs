//! Summary requests

use crate::Category;
use std::collections::BTreeSet;

/// Which documents of a well a request may draw from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentScope {
    /// Only the named (canonical) document
    Selected(String),
    /// Every candidate document of the well
    #[default]
    All,
}

/// A transient, per-query summarization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Well to summarize
    pub well_id: String,

    /// Free-text instruction from the user
    pub user_prompt: String,

    /// Upper bound on the answer length in words
    pub max_words: usize,

    /// Categories derived from the prompt (filled in by the intent mapper)
    pub requested_categories: BTreeSet<Category>,

    /// Document restriction
    pub scope: DocumentScope,
}

impl SummaryRequest {
    /// Create a request spanning all documents; categories are derived later
    pub fn new(well_id: impl Into<String>, user_prompt: impl Into<String>, max_words: usize) -> Self {
        Self {
            well_id: well_id.into(),
            user_prompt: user_prompt.into(),
            max_words,
            requested_categories: BTreeSet::new(),
            scope: DocumentScope::All,
        }
    }

    /// Restrict the request to one document
    pub fn with_document(mut self, document_name: impl Into<String>) -> Self {
        self.scope = DocumentScope::Selected(document_name.into());
        self
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.well_id.trim().is_empty() {
            return Err("well_id is empty".to_string());
        }
        if self.user_prompt.trim().is_empty() {
            return Err("prompt is empty".to_string());
        }
        if self.max_words == 0 {
            return Err("max_words must be greater than 0".to_string());
        }
        Ok(())
    }
}
