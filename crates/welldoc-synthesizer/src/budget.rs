//! Word counting and budget allocation

use serde::{Deserialize, Serialize};

/// Split of an answer's word limit between narrative and tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBudget {
    /// The request's `max_words`
    pub total: usize,
    /// Words for narrative text
    pub text: usize,
    /// Words for tabular content
    pub table: usize,
}

impl WordBudget {
    /// Allocate `total` words, giving `text_share` of them (rounded) to text
    pub fn allocate(total: usize, text_share: f64) -> Self {
        let text = ((total as f64) * text_share.clamp(0.0, 1.0)).round() as usize;
        let text = text.min(total);
        Self {
            total,
            text,
            table: total - text,
        }
    }
}

/// Whitespace-delimited word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cut `text` after its `limit`-th word, keeping the original spacing before it
///
/// Returns the input unchanged when it has at most `limit` words.
pub fn truncate_words(text: &str, limit: usize) -> &str {
    if limit == 0 {
        return "";
    }
    let mut words = 0;
    let mut in_word = false;
    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word {
                words += 1;
                if words == limit {
                    return &text[..idx];
                }
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }
    text.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_split() {
        let budget = WordBudget::allocate(200, 0.7);
        assert_eq!(budget.text, 140);
        assert_eq!(budget.table, 60);
        assert_eq!(budget.total, 200);
    }

    #[test]
    fn test_split_always_sums_to_total() {
        for total in [1, 7, 33, 101, 999] {
            let budget = WordBudget::allocate(total, 0.7);
            assert_eq!(budget.text + budget.table, total);
        }
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("  one two\nthree\tfour "), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        assert_eq!(truncate_words("one two  three four", 3), "one two  three");
        assert_eq!(truncate_words("one two", 5), "one two");
        assert_eq!(truncate_words("one two ", 2), "one two");
        assert_eq!(truncate_words("one", 0), "");
    }

    #[test]
    fn test_truncated_text_has_limit_words() {
        let text = "a b c d e f g h i j k l m n o p";
        assert_eq!(count_words(truncate_words(text, 7)), 7);
    }

    proptest! {
        #[test]
        fn prop_truncation_keeps_a_prefix(
            words in proptest::collection::vec("[a-z0-9]{1,8}", 0..80),
            seps in proptest::collection::vec(prop_oneof![Just(" "), Just("  "), Just("\n"), Just("\t")], 80),
            limit in 0usize..100,
        ) {
            let text: String = words.iter().zip(&seps).map(|(w, s)| format!("{}{}", w, s)).collect();
            let cut = truncate_words(&text, limit);
            prop_assert!(text.starts_with(cut));
            prop_assert_eq!(count_words(cut), words.len().min(limit));
        }

        #[test]
        fn prop_budget_sums_to_total(total in 1usize..10_000, share in 0.0f64..=1.0) {
            let budget = WordBudget::allocate(total, share);
            prop_assert_eq!(budget.text + budget.table, total);
        }
    }
}
