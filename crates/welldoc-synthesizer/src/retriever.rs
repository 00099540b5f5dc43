//! Prioritized retrieval of text and table fragments

use crate::budget::WordBudget;
use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::intent::IntentTable;
use crate::scoring::rank_tables;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};
use welldoc_domain::traits::{ChunkIndex, ChunkQuery, ScoredChunk};
use welldoc_domain::{Category, ChunkType, DocumentScope, SummaryRequest};

/// Non-fatal outcome recorded while answering a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryWarning {
    /// One retrieval channel failed; the other one was used alone
    ChannelUnavailable {
        /// `text` or `table`
        channel: ChunkType,
        /// Failure description
        reason: String,
    },
    /// The compression retry failed; the draft was truncated instead
    CompressionFailed {
        /// Failure description
        reason: String,
    },
    /// The request deadline passed before or during the compression retry
    DeadlineExceeded,
}

impl fmt::Display for SummaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryWarning::ChannelUnavailable { channel, reason } => {
                write!(f, "{} retrieval unavailable: {}", channel.as_str(), reason)
            }
            SummaryWarning::CompressionFailed { reason } => write!(f, "compression failed: {}", reason),
            SummaryWarning::DeadlineExceeded => f.write_str("deadline exceeded, compression abandoned"),
        }
    }
}

/// Fragments and budget for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedContext {
    /// Categories the request was mapped to
    pub categories: BTreeSet<Category>,
    /// Text fragments in index relevance order
    pub text: Vec<ScoredChunk>,
    /// Table fragments ordered by prompt relevance
    pub tables: Vec<ScoredChunk>,
    /// Word allocation between text and tables
    pub budget: WordBudget,
    /// Degraded channels
    pub warnings: Vec<SummaryWarning>,
}

impl RetrievedContext {
    /// Whether neither channel returned anything
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tables.is_empty()
    }
}

/// Maps requests to categories and queries the index in two channels
pub struct PrioritizedRetriever<I> {
    index: Arc<I>,
    intents: Arc<IntentTable>,
    config: Arc<SynthesizerConfig>,
}

impl<I> Clone for PrioritizedRetriever<I> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            intents: Arc::clone(&self.intents),
            config: Arc::clone(&self.config),
        }
    }
}

impl<I> PrioritizedRetriever<I>
where
    I: ChunkIndex + Send + Sync + 'static,
    I::Error: fmt::Display,
{
    /// Create a retriever
    pub fn new(index: Arc<I>, intents: Arc<IntentTable>, config: Arc<SynthesizerConfig>) -> Self {
        Self { index, intents, config }
    }

    /// The intent table in use
    pub fn intents(&self) -> &IntentTable {
        &self.intents
    }

    /// Categories for a request: its own when set, otherwise mapped from the prompt
    pub fn categories_for(&self, request: &SummaryRequest) -> BTreeSet<Category> {
        if request.requested_categories.is_empty() {
            self.intents.map(&request.user_prompt)
        } else {
            request.requested_categories.clone()
        }
    }

    /// Retrieve ranked fragments for a request
    ///
    /// The text and table channels are queried concurrently. One failing
    /// channel becomes a warning; both failing is an error.
    pub async fn retrieve(&self, request: &SummaryRequest) -> Result<RetrievedContext, SynthesizerError> {
        request.validate().map_err(SynthesizerError::InvalidRequest)?;

        let categories = self.categories_for(request);
        debug!(
            "Well {}: prompt mapped to {} categories",
            request.well_id,
            categories.len()
        );

        let text_query = self.query(request, &categories, ChunkType::Text, self.config.text_limit);
        let table_query = self.query(request, &categories, ChunkType::Table, self.config.table_limit);
        let (text, tables) = tokio::join!(self.run(text_query), self.run(table_query));

        let mut warnings = Vec::new();
        let (text, tables) = match (text, tables) {
            (Err(text_err), Err(table_err)) => {
                return Err(SynthesizerError::Retrieval(format!(
                    "text: {}; table: {}",
                    text_err, table_err
                )));
            }
            (text, tables) => (
                degrade(text, ChunkType::Text, &mut warnings),
                degrade(tables, ChunkType::Table, &mut warnings),
            ),
        };

        let tables = rank_tables(&self.intents, &request.user_prompt, tables);
        let budget = WordBudget::allocate(request.max_words, self.config.text_share);

        debug!(
            "Well {}: {} text and {} table fragments, budget {}/{}",
            request.well_id,
            text.len(),
            tables.len(),
            budget.text,
            budget.table
        );

        Ok(RetrievedContext {
            categories,
            text,
            tables,
            budget,
            warnings,
        })
    }

    fn query(
        &self,
        request: &SummaryRequest,
        categories: &BTreeSet<Category>,
        chunk_type: ChunkType,
        limit: usize,
    ) -> ChunkQuery {
        ChunkQuery {
            text: request.user_prompt.clone(),
            well_id: Some(request.well_id.clone()),
            chunk_type: Some(chunk_type),
            categories: Some(categories.clone()),
            document_name: match &request.scope {
                DocumentScope::Selected(name) => Some(name.clone()),
                DocumentScope::All => None,
            },
            limit,
        }
    }

    /// Run an index query on the blocking pool under the index timeout
    async fn run(&self, query: ChunkQuery) -> Result<Vec<ScoredChunk>, SynthesizerError> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }
        let index = Arc::clone(&self.index);
        let task = tokio::task::spawn_blocking(move || {
            index
                .query(&query)
                .map_err(|e| SynthesizerError::Retrieval(e.to_string()))
        });

        timeout(self.config.index_timeout(), task)
            .await
            .map_err(|_| SynthesizerError::Timeout("index query".to_string()))?
            .map_err(|e| SynthesizerError::Join(e.to_string()))?
    }
}

fn degrade(
    result: Result<Vec<ScoredChunk>, SynthesizerError>,
    channel: ChunkType,
    warnings: &mut Vec<SummaryWarning>,
) -> Vec<ScoredChunk> {
    result.unwrap_or_else(|e| {
        warn!("{} retrieval failed: {}", channel.as_str(), e);
        warnings.push(SummaryWarning::ChannelUnavailable {
            channel,
            reason: e.to_string(),
        });
        Vec::new()
    })
}
