//! Well module - the logical unit owning candidate documents

use crate::Document;
use serde::{Deserialize, Serialize};

/// A well and its candidate documents
///
/// Candidates are kept in ranked order (best first). `selected` names the
/// canonical document for single-document queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Well {
    /// Well identifier
    pub well_id: String,

    /// All candidate documents, ranked best first
    pub candidates: Vec<Document>,

    /// File name of the canonical document
    pub selected: Option<String>,
}

impl Well {
    /// The canonical document, if any candidate exists
    pub fn selected_document(&self) -> Option<&Document> {
        let name = self.selected.as_deref()?;
        self.candidates.iter().find(|d| d.filename == name)
    }

    /// Whether more than one physical file represents this well
    pub fn is_multi_document(&self) -> bool {
        self.candidates.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_document_lookup() {
        let well = Well {
            well_id: "W".to_string(),
            candidates: vec![
                Document::new("W", "b.pdf", "/w/b.pdf", 1),
                Document::new("W", "a.pdf", "/w/a.pdf", 1),
            ],
            selected: Some("a.pdf".to_string()),
        };
        assert_eq!(well.selected_document().map(|d| d.filepath.as_str()), Some("/w/a.pdf"));
        assert!(well.is_multi_document());
    }

    #[test]
    fn test_empty_well_has_no_selection() {
        let well = Well {
            well_id: "W".to_string(),
            candidates: Vec::new(),
            selected: None,
        };
        assert!(well.selected_document().is_none());
        assert!(!well.is_multi_document());
    }
}
