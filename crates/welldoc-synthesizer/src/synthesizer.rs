//! Budgeted, cited summaries of a well's reports

use crate::budget::{count_words, truncate_words, WordBudget};
use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::intent::IntentTable;
use crate::prompt::{compression_prompt, PromptBuilder, COMPRESSION_SYSTEM, SUMMARY_SYSTEM};
use crate::retriever::{PrioritizedRetriever, SummaryWarning};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};
use welldoc_domain::traits::{ChunkIndex, TextGenerator};
use welldoc_domain::{Category, Provenance, SummaryRequest};

/// Generated answer with its sources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Answer text
    pub text: String,
    /// Words in `text`
    pub word_count: usize,
    /// Cut at the word limit after compression did not suffice
    pub truncated: bool,
    /// A compression pass was run
    pub compressed: bool,
    /// Word allocation used for the request
    pub budget: WordBudget,
    /// Categories the request was answered from
    pub categories: BTreeSet<Category>,
    /// Citations of the text excerpts, in prompt order (`[1]`, `[2]`, ...)
    pub text_sources: Vec<Provenance>,
    /// Citations of the table excerpts, in prompt order (`[T1]`, `[T2]`, ...)
    pub table_sources: Vec<Provenance>,
    /// Non-fatal outcomes
    pub warnings: Vec<SummaryWarning>,
}

/// Retrieves context and asks the generator for a bounded summary
///
/// At most two generator calls are made per request: the draft and one
/// compression retry when the draft is over the word limit.
pub struct Synthesizer<I, G> {
    retriever: PrioritizedRetriever<I>,
    generator: Arc<G>,
    config: Arc<SynthesizerConfig>,
}

impl<I, G> Clone for Synthesizer<I, G> {
    fn clone(&self) -> Self {
        Self {
            retriever: self.retriever.clone(),
            generator: Arc::clone(&self.generator),
            config: Arc::clone(&self.config),
        }
    }
}

impl<I, G> Synthesizer<I, G>
where
    I: ChunkIndex + Send + Sync + 'static,
    I::Error: fmt::Display,
    G: TextGenerator + Send + Sync + 'static,
    G::Error: fmt::Display,
{
    /// Create a synthesizer
    pub fn new(
        index: Arc<I>,
        generator: G,
        intents: Arc<IntentTable>,
        config: SynthesizerConfig,
    ) -> Result<Self, SynthesizerError> {
        config.validate().map_err(SynthesizerError::Config)?;
        let config = Arc::new(config);

        Ok(Self {
            retriever: PrioritizedRetriever::new(index, intents, Arc::clone(&config)),
            generator: Arc::new(generator),
            config,
        })
    }

    /// The retriever used for context
    pub fn retriever(&self) -> &PrioritizedRetriever<I> {
        &self.retriever
    }

    /// Answer a request within its word limit
    pub async fn summarize(&self, request: SummaryRequest) -> Result<Summary, SynthesizerError> {
        let started = Instant::now();
        let context = self.retriever.retrieve(&request).await?;
        if context.is_empty() {
            return Err(SynthesizerError::NoContext(request.well_id));
        }
        let mut warnings = context.warnings.clone();

        let user = PromptBuilder::new(&request.user_prompt, context.budget)
            .with_text(&context.text)
            .with_tables(&context.tables)
            .build();
        let mut text = self.generate(SUMMARY_SYSTEM, user).await?;
        let mut compressed = false;

        if count_words(&text) > request.max_words {
            let remaining = self.config.request_deadline().saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!("Well {}: deadline passed, skipping compression", request.well_id);
                warnings.push(SummaryWarning::DeadlineExceeded);
            } else {
                info!(
                    "Well {}: draft has {} words (limit {}), compressing",
                    request.well_id,
                    count_words(&text),
                    request.max_words
                );
                let limit = remaining.min(self.config.generation_timeout());
                match self
                    .generate_within(COMPRESSION_SYSTEM, compression_prompt(&text, request.max_words), limit)
                    .await
                {
                    Ok(shorter) => {
                        text = shorter;
                        compressed = true;
                    }
                    Err(SynthesizerError::Timeout(_)) if limit == remaining => {
                        warn!("Well {}: deadline reached during compression", request.well_id);
                        warnings.push(SummaryWarning::DeadlineExceeded);
                    }
                    Err(e) => {
                        warn!("Well {}: compression failed: {}", request.well_id, e);
                        warnings.push(SummaryWarning::CompressionFailed { reason: e.to_string() });
                    }
                }
            }
        }

        let mut truncated = false;
        if count_words(&text) > request.max_words {
            text = truncate_words(&text, request.max_words).to_string();
            truncated = true;
            info!("Well {}: truncated to {} words", request.well_id, request.max_words);
        }

        Ok(Summary {
            word_count: count_words(&text),
            text,
            truncated,
            compressed,
            budget: context.budget,
            categories: context.categories,
            text_sources: context.text.iter().map(|h| h.chunk.provenance()).collect(),
            table_sources: context.tables.iter().map(|h| h.chunk.provenance()).collect(),
            warnings,
        })
    }

    async fn generate(&self, system: &'static str, user: String) -> Result<String, SynthesizerError> {
        self.generate_within(system, user, self.config.generation_timeout()).await
    }

    /// Run a generator call on the blocking pool, giving up after `limit`
    async fn generate_within(
        &self,
        system: &'static str,
        user: String,
        limit: Duration,
    ) -> Result<String, SynthesizerError> {
        let generator = Arc::clone(&self.generator);
        let temperature = self.config.temperature;
        let task = tokio::task::spawn_blocking(move || {
            generator
                .generate(system, &user, temperature)
                .map_err(|e| SynthesizerError::Generation(e.to_string()))
        });

        let text = timeout(limit, task)
            .await
            .map_err(|_| SynthesizerError::Timeout("generation".to_string()))?
            .map_err(|e| SynthesizerError::Join(e.to_string()))??;
        Ok(text.trim().to_string())
    }
}
