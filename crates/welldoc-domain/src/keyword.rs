//! Whole-word keyword matching shared by the section taxonomy and the intent table

/// Whole-word phrase match; a plural `s` after the phrase still matches
///
/// Both arguments are expected in lowercase. "location" does not match inside
/// "allocation", and "bha" does not match inside "bhakti".
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    haystack.match_indices(phrase).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let mut after = haystack[start + phrase.len()..].chars();
        let left_ok = before.is_none_or(|c| !c.is_alphanumeric());
        let right_ok = match after.next() {
            None => true,
            Some('s') => after.next().is_none_or(|c| !c.is_alphanumeric()),
            Some(c) => !c.is_alphanumeric(),
        };
        left_ok && right_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_boundaries() {
        assert!(contains_phrase("the casing program", "casing"));
        assert!(contains_phrase("all liners set", "liner"));
        assert!(contains_phrase("well test results", "well test"));
        assert!(contains_phrase("appendix a - casing tally", "appendix"));
        assert!(!contains_phrase("acme ltd report", "td"));
        assert!(!contains_phrase("in orbit", "bit"));
        assert!(!contains_phrase("cost allocation", "location"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn test_later_occurrence_can_match() {
        assert!(contains_phrase("mudline and mud", "mud"));
        assert!(!contains_phrase("mudline", "mud"));
    }
}
