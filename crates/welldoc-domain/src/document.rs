//! Document module - the per-file metadata record

use crate::{Category, TocEntry};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which text source the table of contents was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMethod {
    /// Structured conversion output
    Primary,
    /// Raw text extraction, used when the structured output was empty
    Fallback,
}

impl ParseMethod {
    /// Get the parse method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMethod::Primary => "primary",
            ParseMethod::Fallback => "fallback",
        }
    }
}

/// A report file together with its resolved metadata
///
/// This is also the persisted metadata record: serializing it yields
/// `well_id, filename, filepath, file_size, pub_date (ISO or null), is_scanned,
/// parse_method, toc`. Records are immutable once metadata resolution finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Logical well this file belongs to
    pub well_id: String,

    /// File name without directories
    pub filename: String,

    /// Full path as indexed
    pub filepath: String,

    /// Size in bytes
    pub file_size: u64,

    /// Canonical publication date, if one could be resolved
    pub pub_date: Option<NaiveDate>,

    /// Whether the file looks like an image scan (little extractable text)
    pub is_scanned: bool,

    /// Source of the table of contents
    pub parse_method: ParseMethod,

    /// Table of contents in source order
    pub toc: Vec<TocEntry>,
}

impl Document {
    /// Create a record with no resolved metadata yet
    pub fn new(
        well_id: impl Into<String>,
        filename: impl Into<String>,
        filepath: impl Into<String>,
        file_size: u64,
    ) -> Self {
        Self {
            well_id: well_id.into(),
            filename: filename.into(),
            filepath: filepath.into(),
            file_size,
            pub_date: None,
            is_scanned: false,
            parse_method: ParseMethod::Primary,
            toc: Vec::new(),
        }
    }

    /// Publication year, if a date was resolved
    pub fn pub_year(&self) -> Option<i32> {
        self.pub_date.map(|d| d.year())
    }

    /// Whether the TOC is long enough to be trusted for section lookup
    pub fn has_usable_toc(&self, min_entries: usize) -> bool {
        self.toc.len() >= min_entries
    }

    /// Number of TOC entries carrying a category
    pub fn categorized_entries(&self) -> usize {
        self.toc.iter().filter(|e| e.is_categorized()).count()
    }

    /// Entries of the TOC assigned to `category`, in source order
    pub fn sections_in(&self, category: Category) -> impl Iterator<Item = &TocEntry> {
        self.toc
            .iter()
            .filter(move |e| e.category == Some(category))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn category_strategy() -> impl Strategy<Value = Option<Category>> {
        prop_oneof![
            Just(None),
            (0usize..Category::ALL.len()).prop_map(|i| Some(Category::ALL[i])),
        ]
    }

    proptest! {
        /// Property: serialization round-trip keeps TOC order and categories
        #[test]
        fn test_round_trip_any_toc(
            rows in prop::collection::vec(("[A-Za-z ]{1,20}", 1u32..500, category_strategy()), 0..20)
        ) {
            let mut doc = Document::new("W", "a.pdf", "/w/a.pdf", 10);
            for (i, (title, page, category)) in rows.iter().enumerate() {
                if title.trim().is_empty() {
                    continue;
                }
                let mut entry = TocEntry::new((i + 1).to_string(), title.clone(), *page).unwrap();
                entry.category = *category;
                doc.toc.push(entry);
            }

            let json = serde_json::to_string(&doc).unwrap();
            let back: Document = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, doc);
        }
    }
}
