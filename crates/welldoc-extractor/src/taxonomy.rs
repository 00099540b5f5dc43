//! Versioned keyword table mapping section titles to categories

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use welldoc_domain::Category;

const BUILTIN: &str = include_str!("../data/taxonomy.toml");

/// Keywords owned by one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    /// The category
    pub category: Category,
    /// Lowercase title strings and keywords
    pub keywords: Vec<String>,
}

/// Immutable keyword table, ordered by category priority
///
/// Loaded once at start-up and shared read-only. Changing keywords means a new
/// `version` and a fresh coverage run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Table version label
    pub version: String,
    /// Categories in priority order (earlier wins)
    pub categories: Vec<CategoryKeywords>,
}

impl Taxonomy {
    /// The table shipped with the crate
    pub fn builtin() -> Result<Self, ExtractorError> {
        Self::from_toml(BUILTIN)
    }

    /// Parse and validate a table from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let parsed: Taxonomy =
            toml::from_str(toml_str).map_err(|e| ExtractorError::Taxonomy(format!("Failed to parse TOML: {}", e)))?;
        parsed.normalized()
    }

    /// Load a table from a TOML file
    pub fn load(path: &Path) -> Result<Self, ExtractorError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractorError::Taxonomy(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self).map_err(|e| ExtractorError::Taxonomy(format!("Failed to serialize: {}", e)))
    }

    /// Lowercase and trim keywords, drop blanks, reject duplicate categories
    fn normalized(mut self) -> Result<Self, ExtractorError> {
        let mut seen = HashSet::new();
        for entry in &mut self.categories {
            if !seen.insert(entry.category) {
                return Err(ExtractorError::Taxonomy(format!(
                    "Category {} listed more than once",
                    entry.category
                )));
            }
            entry.keywords = entry
                .keywords
                .iter()
                .map(|k| normalize_title(k))
                .filter(|k| !k.is_empty())
                .collect();
        }
        Ok(self)
    }

    /// Return a copy with one more keyword for `category`
    ///
    /// A category missing from the table is appended at lowest priority.
    pub fn with_keyword(mut self, category: Category, keyword: &str) -> Self {
        let keyword = normalize_title(keyword);
        if keyword.is_empty() {
            return self;
        }
        match self.categories.iter_mut().find(|c| c.category == category) {
            Some(entry) => {
                if !entry.keywords.contains(&keyword) {
                    entry.keywords.push(keyword);
                }
            }
            None => self.categories.push(CategoryKeywords {
                category,
                keywords: vec![keyword],
            }),
        }
        self
    }

    /// Categories in priority order
    pub fn priority(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.category).collect()
    }

    /// Total number of keywords
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

/// Lowercase, collapse whitespace and strip surrounding punctuation
pub fn normalize_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    collapsed
        .trim_matches(|c: char| !c.is_alphanumeric() && c != ')' && c != '(')
        .to_string()
}
