//! Welldoc Synthesizer
//!
//! Answers free-text questions about a well from its indexed report fragments.
//!
//! # Architecture
//!
//! ```text
//! prompt → intent table → categories
//!        → index (text channel, table channel) → table ranking
//!        → word budget → generator → compression retry → truncation
//! ```
//!
//! Collaborators are the `ChunkIndex` and `TextGenerator` traits from
//! `welldoc-domain`; both are called on the blocking pool under a timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use welldoc_domain::SummaryRequest;
//! use welldoc_llm::MockGenerator;
//! use welldoc_store::MemoryIndex;
//! use welldoc_synthesizer::{IntentTable, Synthesizer, SynthesizerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let synthesizer = Synthesizer::new(
//!     Arc::new(MemoryIndex::new()),
//!     MockGenerator::new("Casing was set at 800 m [1]."),
//!     Arc::new(IntentTable::builtin()?),
//!     SynthesizerConfig::default(),
//! )?;
//! let summary = synthesizer
//!     .summarize(SummaryRequest::new("NLW-GT-01", "Summarize the casing program", 200))
//!     .await?;
//! println!("{}", summary.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod budget;
mod config;
mod error;
pub mod intent;
pub mod prompt;
pub mod retriever;
pub mod scoring;
pub mod synthesizer;

pub use budget::{count_words, truncate_words, WordBudget};
pub use config::SynthesizerConfig;
pub use error::SynthesizerError;
pub use intent::IntentTable;
pub use retriever::{PrioritizedRetriever, RetrievedContext, SummaryWarning};
pub use synthesizer::{Summary, Synthesizer};
