//! Table-of-contents entries

use crate::Category;
use serde::{Deserialize, Serialize};

/// One line of a recovered table of contents
///
/// Entries keep the order in which they appear in the source, which matches
/// physical page order. Deserialization goes through [`TocEntry::new`], so a
/// stored record cannot bypass its checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTocEntry")]
pub struct TocEntry {
    /// Hierarchical section numeral (`3`, `3.2`, `3.2.1`), may be empty
    pub number: String,

    /// Section title as printed
    pub title: String,

    /// Page the section starts on (>= 1)
    pub page: u32,

    /// Assigned category, `None` while unclassified
    pub category: Option<Category>,
}

impl TocEntry {
    /// Create an uncategorized entry after checking the invariants
    ///
    /// A trailing dot on the numeral (`"2."`) is stripped before validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use welldoc_domain::TocEntry;
    ///
    /// let entry = TocEntry::new("4.1.", "Casing program", 12).unwrap();
    /// assert_eq!(entry.number, "4.1");
    /// assert!(TocEntry::new("4.1", "Casing program", 0).is_err());
    /// ```
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        page: u32,
    ) -> Result<Self, String> {
        let number = number.into();
        let number = number.trim().trim_end_matches('.').to_string();
        let title = title.into().trim().to_string();

        if page == 0 {
            return Err("page must be >= 1".to_string());
        }
        if title.is_empty() {
            return Err("title is empty".to_string());
        }
        if !number.is_empty() && !is_hierarchical_numeral(&number) {
            return Err(format!("'{}' is not a hierarchical numeral", number));
        }

        Ok(Self {
            number,
            title,
            page,
            category: None,
        })
    }

    /// Nesting depth of the numeral (`"3"` → 1, `"3.2.1"` → 3, empty → 0)
    pub fn depth(&self) -> usize {
        if self.number.is_empty() {
            0
        } else {
            self.number.split('.').count()
        }
    }

    /// Whether a category has been assigned
    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }
}

/// Unchecked wire form of [`TocEntry`]
#[derive(Deserialize)]
struct StoredTocEntry {
    number: String,
    title: String,
    page: u32,
    category: Option<Category>,
}

impl TryFrom<StoredTocEntry> for TocEntry {
    type Error = String;

    fn try_from(stored: StoredTocEntry) -> Result<Self, Self::Error> {
        let mut entry = TocEntry::new(stored.number, stored.title, stored.page)?;
        entry.category = stored.category;
        Ok(entry)
    }
}

/// True for `1`, `12`, `3.2`, `3.2.10`; false for empty parts or non-digits
pub fn is_hierarchical_numeral(s: &str) -> bool {
    !s.is_empty()
        && s.split('.')
            .all(|part| !part.is_empty() && part.len() <= 3 && part.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchical_numerals() {
        assert!(is_hierarchical_numeral("1"));
        assert!(is_hierarchical_numeral("10.2.3"));
        assert!(!is_hierarchical_numeral(""));
        assert!(!is_hierarchical_numeral("1..2"));
        assert!(!is_hierarchical_numeral("A.1"));
        assert!(!is_hierarchical_numeral("2011"));
    }

    #[test]
    fn test_entry_allows_empty_number() {
        let entry = TocEntry::new("", "Appendix A", 40).unwrap();
        assert_eq!(entry.depth(), 0);
        assert!(!entry.is_categorized());
    }

    #[test]
    fn test_entry_rejects_bad_input() {
        assert!(TocEntry::new("1", "   ", 3).is_err());
        assert!(TocEntry::new("x.1", "Title", 3).is_err());
        assert!(TocEntry::new("1", "Title", 0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TocEntry =
            serde_json::from_str(r#"{"number":"3","title":"Casing","page":9,"category":"casing"}"#).unwrap();
        assert_eq!(ok.category, Some(Category::Casing));
        assert_eq!(ok.page, 9);

        let zero_page = serde_json::from_str::<TocEntry>(r#"{"number":"3","title":"Casing","page":0,"category":null}"#);
        assert!(zero_page.unwrap_err().to_string().contains("page must be >= 1"));

        let empty_title = serde_json::from_str::<TocEntry>(r#"{"number":"3","title":"  ","page":4,"category":null}"#);
        assert!(empty_title.is_err());

        let bad_number = serde_json::from_str::<TocEntry>(r#"{"number":"A.1","title":"Casing","page":4,"category":null}"#);
        assert!(bad_number.is_err());
    }

    #[test]
    fn test_serialized_entry_reloads() {
        let mut entry = TocEntry::new("4.1", "Cementing", 12).unwrap();
        entry.category = Some(Category::Casing);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(serde_json::from_str::<TocEntry>(&json).unwrap(), entry);
    }

    #[test]
    fn test_depth() {
        assert_eq!(TocEntry::new("3.2.1", "Liner", 9).unwrap().depth(), 3);
    }
}
