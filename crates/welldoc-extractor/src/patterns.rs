//! Line-shape patterns shared by the boundary detector and the cascade

use regex::Regex;
use std::sync::LazyLock;

/// Headings that introduce a contents listing (matched as lowercase substrings)
pub const CONTENTS_KEYWORDS: &[&str] = &[
    "table of contents",
    "contents",
    "inhoudsopgave",
    "inhoud",
    "index",
];

/// Generic "numeral + text + trailing number" shape of a TOC line, any separator
static ENTRY_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\|?\s*\d{1,3}(?:\.\d{1,3})*\.?[\s|]+.*\p{L}.*\D\d{1,4}\s*\|?\s*$")
        .expect("valid regex")
});

/// Line ending in a page-number-like token
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*\|?\s*$").expect("valid regex"));

/// Whether the line contains a contents keyword
pub fn is_contents_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    CONTENTS_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether the line looks like a TOC entry under any strategy
pub fn is_entry_shape(line: &str) -> bool {
    ENTRY_SHAPE.is_match(line)
}

/// Whether the line is a body heading that closes a TOC region
///
/// Only capitalised headings without a page number qualify: "GEOLOGY" or
/// "1 INTRODUCTION". Running headers mentioning "page" never qualify.
pub fn is_structural_heading(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_entry_shape(trimmed) || is_contents_keyword(trimmed) {
        return false;
    }
    if trimmed.to_lowercase().contains("page") || TRAILING_NUMBER.is_match(trimmed) {
        return false;
    }

    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_shapes() {
        assert!(is_entry_shape("1 Introduction ........ 3"));
        assert!(is_entry_shape("2.1   Casing program      12"));
        assert!(is_entry_shape("| 3 | Geology | 7 |"));
        assert!(is_entry_shape("4.\tCompletion\t22"));
        assert!(!is_entry_shape("Introduction 3"));
        assert!(!is_entry_shape("2011"));
    }

    #[test]
    fn test_contents_keywords() {
        assert!(is_contents_keyword("TABLE OF CONTENTS"));
        assert!(is_contents_keyword("Inhoudsopgave"));
        assert!(!is_contents_keyword("Summary"));
    }

    #[test]
    fn test_structural_headings() {
        assert!(is_structural_heading("1 INTRODUCTION"));
        assert!(is_structural_heading("GEOLOGY"));
        assert!(!is_structural_heading("CONTENTS"));
        assert!(!is_structural_heading("1 INTRODUCTION ..... 3"));
        assert!(!is_structural_heading("PAGE 2 OF 40"));
        assert!(!is_structural_heading("Introduction"));
        assert!(!is_structural_heading("   "));
    }
}
