//! Provenance tracking for cited fragments

use crate::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a retrieved fragment came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// File name of the source document
    pub document_name: String,

    /// Section numeral
    pub section_number: String,

    /// Section title
    pub section_title: String,

    /// Section category, if classified
    pub category: Option<Category>,

    /// Start page of the fragment
    pub page: u32,
}

impl fmt::Display for Provenance {
    /// Citation form: `EOWR.pdf §4.2 Casing (casing), p. 17`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document_name)?;
        if !self.section_number.is_empty() {
            write!(f, " §{}", self.section_number)?;
        }
        if !self.section_title.is_empty() {
            write!(f, " {}", self.section_title)?;
        }
        if let Some(category) = self.category {
            write!(f, " ({})", category)?;
        }
        write!(f, ", p. {}", self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_format() {
        let p = Provenance {
            document_name: "EOWR.pdf".to_string(),
            section_number: "4.2".to_string(),
            section_title: "Casing".to_string(),
            category: Some(Category::Casing),
            page: 17,
        };
        assert_eq!(p.to_string(), "EOWR.pdf §4.2 Casing (casing), p. 17");
    }

    #[test]
    fn test_citation_without_section() {
        let p = Provenance {
            document_name: "scan.pdf".to_string(),
            section_number: String::new(),
            section_title: String::new(),
            category: None,
            page: 1,
        };
        assert_eq!(p.to_string(), "scan.pdf, p. 1");
    }
}
