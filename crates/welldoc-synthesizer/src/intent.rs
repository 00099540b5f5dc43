//! Mapping free-text prompts to section categories

use crate::error::SynthesizerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use welldoc_domain::keyword::contains_phrase;
use welldoc_domain::Category;

const BUILTIN: &str = include_str!("../data/intents.toml");

/// Prompt keywords for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentKeywords {
    /// The category
    pub category: Category,
    /// Lowercase words or phrases
    pub keywords: Vec<String>,
}

/// Immutable keyword-to-category table for user prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentTable {
    /// Table version label
    pub version: String,
    /// Keyword sets per category
    pub intents: Vec<IntentKeywords>,
}

impl IntentTable {
    /// The table shipped with the crate
    pub fn builtin() -> Result<Self, SynthesizerError> {
        Self::from_toml(BUILTIN)
    }

    /// Parse a table from TOML; keywords are lowercased and trimmed
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        let mut table: IntentTable = toml::from_str(toml_str)
            .map_err(|e| SynthesizerError::Config(format!("Failed to parse intent table: {}", e)))?;
        for intent in &mut table.intents {
            intent.keywords = intent
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn load(path: &Path) -> Result<Self, SynthesizerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SynthesizerError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Categories a prompt asks for; every category when nothing matches
    pub fn map(&self, prompt: &str) -> BTreeSet<Category> {
        let prompt = prompt.to_lowercase();
        let matched: BTreeSet<Category> = self
            .intents
            .iter()
            .filter(|i| i.keywords.iter().any(|k| contains_phrase(&prompt, k)))
            .map(|i| i.category)
            .collect();

        if matched.is_empty() {
            Category::ALL.iter().copied().collect()
        } else {
            matched
        }
    }

    /// Number of `category` keywords present in the prompt
    pub fn keyword_hits(&self, prompt: &str, category: Category) -> usize {
        let prompt = prompt.to_lowercase();
        self.intents
            .iter()
            .filter(|i| i.category == category)
            .flat_map(|i| i.keywords.iter())
            .filter(|k| contains_phrase(&prompt, k))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IntentTable {
        IntentTable::builtin().unwrap()
    }

    #[test]
    fn test_builtin_table_parses() {
        let t = table();
        assert_eq!(t.intents.len(), Category::ALL.len());
    }

    #[test]
    fn test_casing_prompt() {
        let cats = table().map("Summarize the casing program in 200 words");
        assert_eq!(cats, [Category::Casing, Category::Completion].into_iter().collect());
    }

    #[test]
    fn test_lithology_prompt() {
        let cats = table().map("Describe the lithology");
        assert_eq!(cats, [Category::Geology].into_iter().collect());
    }


    #[test]
    fn test_multiple_matches_accumulate() {
        let cats = table().map("Describe the casing and the geology of the reservoir");
        assert!(cats.contains(&Category::Casing));
        assert!(cats.contains(&Category::Geology));
        assert!(cats.contains(&Category::Completion));
        assert_eq!(cats.len(), 3);
    }

    #[test]
    fn test_no_match_means_all_categories() {
        let cats = table().map("Tell me everything");
        assert_eq!(cats.len(), Category::ALL.len());
    }

    #[test]
    fn test_keywords_match_whole_words() {
        let t = table();
        // "td" is a borehole keyword but must not fire inside "ltd"
        assert_eq!(t.keyword_hits("report by acme ltd", Category::Borehole), 0);
        assert_eq!(t.keyword_hits("depth at td", Category::Borehole), 1);
    }

    #[test]
    fn test_keyword_hits() {
        let t = table();
        assert_eq!(t.keyword_hits("casing shoe and cement", Category::Casing), 3);
        assert_eq!(t.keyword_hits("casing shoe and cement", Category::Geology), 0);
    }
}
