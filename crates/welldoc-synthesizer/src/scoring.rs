//! Relevance ordering of table fragments

use crate::intent::IntentTable;
use welldoc_domain::keyword::contains_phrase;
use welldoc_domain::traits::ScoredChunk;
use welldoc_domain::Category;

/// Intent-keyword hits for the fragment's category, plus one when the
/// category's own name appears in the prompt
pub fn table_score(intents: &IntentTable, prompt: &str, category: Option<Category>) -> usize {
    let Some(category) = category else {
        return 0;
    };
    let named = contains_phrase(&prompt.to_lowercase(), &category.label());
    intents.keyword_hits(prompt, category) + usize::from(named)
}

/// Sort table fragments by descending score; equal scores keep index order
pub fn rank_tables(intents: &IntentTable, prompt: &str, tables: Vec<ScoredChunk>) -> Vec<ScoredChunk> {
    let mut scored: Vec<(usize, ScoredChunk)> = tables
        .into_iter()
        .map(|t| (table_score(intents, prompt, t.chunk.category), t))
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.into_iter().map(|(_, t)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use welldoc_domain::{Chunk, ChunkType};

    fn table(category: Category, title: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                text: "| a | b |".to_string(),
                chunk_type: ChunkType::Table,
                well_id: "W1".to_string(),
                document_name: "EOWR.pdf".to_string(),
                section_number: "1".to_string(),
                section_title: title.to_string(),
                category: Some(category),
                page: 1,
            },
            score: 0.0,
        }
    }

    #[test]
    fn test_category_name_adds_one() {
        let intents = IntentTable::builtin().unwrap();
        let prompt = "Summarize the casing program in 200 words";
        // one keyword hit ("casing") plus the category name
        assert_eq!(table_score(&intents, prompt, Some(Category::Casing)), 2);
        assert_eq!(table_score(&intents, prompt, Some(Category::Geology)), 0);
        // "casing" is also a completion keyword, but without the name bonus
        assert_eq!(table_score(&intents, prompt, Some(Category::Completion)), 1);
        assert_eq!(table_score(&intents, prompt, None), 0);
    }

    #[test]
    fn test_casing_ranked_above_geology() {
        let intents = IntentTable::builtin().unwrap();
        let ranked = rank_tables(
            &intents,
            "Summarize the casing program in 200 words",
            vec![table(Category::Geology, "Formation tops"), table(Category::Casing, "Casing tally")],
        );
        assert_eq!(ranked[0].chunk.category, Some(Category::Casing));
        assert_eq!(ranked[1].chunk.category, Some(Category::Geology));
    }

    #[test]
    fn test_casing_ranked_above_completion() {
        let intents = IntentTable::builtin().unwrap();
        let ranked = rank_tables(
            &intents,
            "Summarize the casing program in 200 words",
            vec![table(Category::Completion, "Completion string"), table(Category::Casing, "Casing tally")],
        );
        assert_eq!(ranked[0].chunk.category, Some(Category::Casing));
        assert_eq!(ranked[1].chunk.category, Some(Category::Completion));
    }

    #[test]
    fn test_equal_scores_keep_order() {
        let intents = IntentTable::builtin().unwrap();
        let ranked = rank_tables(
            &intents,
            "anything",
            vec![table(Category::Hse, "first"), table(Category::Geology, "second"), table(Category::Borehole, "third")],
        );
        let titles: Vec<_> = ranked.iter().map(|t| t.chunk.section_title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }
}
