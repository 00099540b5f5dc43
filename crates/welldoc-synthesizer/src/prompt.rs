//! Generator prompts for budgeted summaries

use crate::budget::WordBudget;
use welldoc_domain::traits::ScoredChunk;

/// System instruction for the summary call
pub const SUMMARY_SYSTEM: &str = "You are a petroleum and geothermal engineering analyst. \
You summarize end-of-well and end-of-job reports strictly from the excerpts provided. \
Never invent depths, dates, sizes or quantities that are not in the excerpts.";

/// System instruction for the compression call
pub const COMPRESSION_SYSTEM: &str = "You are an editor. You shorten technical summaries \
without changing facts or dropping citation markers.";

const SUMMARY_RULES: &str = r#"Rules:
- Answer only from the excerpts above.
- Cite every statement with its excerpt marker, e.g. [1] or [T2].
- If the excerpts do not cover part of the request, say so briefly.
- Do not add a preamble or closing remarks."#;

/// Builds the user instructions sent to the generator
pub struct PromptBuilder<'a> {
    request: &'a str,
    budget: WordBudget,
    text: &'a [ScoredChunk],
    tables: &'a [ScoredChunk],
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for one request
    pub fn new(request: &'a str, budget: WordBudget) -> Self {
        Self {
            request,
            budget,
            text: &[],
            tables: &[],
        }
    }

    /// Narrative excerpts, cited as `[1]`, `[2]`, ...
    pub fn with_text(mut self, text: &'a [ScoredChunk]) -> Self {
        self.text = text;
        self
    }

    /// Table excerpts, cited as `[T1]`, `[T2]`, ...
    pub fn with_tables(mut self, tables: &'a [ScoredChunk]) -> Self {
        self.tables = tables;
        self
    }

    /// Build the summary instruction
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!("Request: {}\n\n", self.request));

        if !self.text.is_empty() {
            prompt.push_str("Report excerpts:\n");
            for (i, hit) in self.text.iter().enumerate() {
                prompt.push_str(&format!("[{}] {}\n{}\n\n", i + 1, hit.chunk.provenance(), hit.chunk.text));
            }
        }

        if !self.tables.is_empty() {
            prompt.push_str("Report tables:\n");
            for (i, hit) in self.tables.iter().enumerate() {
                prompt.push_str(&format!("[T{}] {}\n{}\n\n", i + 1, hit.chunk.provenance(), hit.chunk.text));
            }
        }

        prompt.push_str(&format!(
            "Write at most {} words: about {} words of narrative",
            self.budget.total, self.budget.text
        ));
        if self.tables.is_empty() {
            prompt.push_str(".\n\n");
        } else {
            prompt.push_str(&format!(
                " and about {} words summarizing the table data.\n\n",
                self.budget.table
            ));
        }

        prompt.push_str(SUMMARY_RULES);
        prompt
    }
}

/// Instruction for the single compression retry
pub fn compression_prompt(draft: &str, max_words: usize) -> String {
    format!(
        "Rewrite the summary below in at most {} words. Keep every citation marker \
         that still applies and keep all numbers exact.\n\n---\n{}\n---",
        max_words, draft
    )
}
