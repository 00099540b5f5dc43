//! Term-overlap relevance scoring
//!
//! The index is a stand-in for a similarity store: a hit's score is the share of
//! query terms found in the chunk text, plus half that weight for terms found in
//! the section title.

use std::collections::BTreeSet;
use welldoc_domain::traits::ScoredChunk;
use welldoc_domain::Chunk;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "about", "what", "which", "this", "that", "words",
    "summarize", "summary", "describe", "give", "please", "in", "of", "on", "to", "a", "an", "is",
    "are", "was", "were", "de", "het", "een", "van",
];

/// Lowercased alphanumeric terms of `text`, stopwords removed
pub fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(|t| t.to_lowercase())
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Relevance of `chunk` for the query terms (0.0 when there are none)
pub fn score(query_terms: &BTreeSet<String>, chunk: &Chunk) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let body = terms(&chunk.text);
    let title = terms(&chunk.section_title);

    let body_hits = query_terms.iter().filter(|t| body.contains(*t)).count();
    let title_hits = query_terms.iter().filter(|t| title.contains(*t)).count();

    (body_hits as f64 + 0.5 * title_hits as f64) / query_terms.len() as f64
}

/// Score, stable-sort descending and cut to `limit`
pub fn rank<'a, I>(query_text: &str, chunks: I, limit: usize) -> Vec<ScoredChunk>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let query_terms = terms(query_text);
    let mut hits: Vec<ScoredChunk> = chunks
        .into_iter()
        .map(|chunk| ScoredChunk {
            score: score(&query_terms, chunk),
            chunk: chunk.clone(),
        })
        .collect();

    // sort_by is stable: equal scores keep insertion order
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(limit);
    hits
}
