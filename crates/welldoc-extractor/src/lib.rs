//! Welldoc Extractor
//!
//! Recovers per-document metadata from converted report text.
//!
//! # Overview
//!
//! Well reports arrive as scanned or digital files, often several per well and
//! in English or Dutch. For each file this crate finds the table of contents,
//! parses its entries, classifies them into report sections and resolves a
//! publication date. Across files of one well it picks the canonical report.
//!
//! # Architecture
//!
//! ```text
//! front matter → BoundaryDetector → PatternCascade → CategoryClassifier ─┐
//!                                       DateResolver (primary, then raw) ─┴→ Document
//! Documents of a well → CandidateSelector → Well
//! Document + pages → SectionChunker → Chunks for the index
//! ```
//!
//! # Key Features
//!
//! - **Cascade of TOC strategies**: delimited tables, dotted leaders, spacing, tabs
//! - **Locale-aware dates**: Dutch month names, ordinal days, keyword context
//! - **Dual-source fallback**: raw text is consulted only when structured text fails
//! - **Coverage tracking**: categorized vs total entries per taxonomy version
//! - **Bounded concurrency**: batches run on a semaphore-limited task set
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use welldoc_extractor::{DocumentPipeline, DocumentSource, ExtractorConfig, Taxonomy};
//! # use welldoc_domain::traits::DocumentConverter;
//! # struct Converter;
//! # impl DocumentConverter for Converter {
//! #     type Error = std::io::Error;
//! #     fn structured_pages(&self, _: &std::path::Path, _: usize) -> Result<Vec<String>, Self::Error> { Ok(vec![]) }
//! #     fn raw_text(&self, _: &std::path::Path) -> Result<String, Self::Error> { Ok(String::new()) }
//! # }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let taxonomy = Arc::new(Taxonomy::builtin()?);
//! let pipeline = DocumentPipeline::new(Converter, taxonomy, ExtractorConfig::default())?;
//!
//! let processed = pipeline
//!     .process(&DocumentSource::new("NLW-GT-01", "/data/NLW-GT-01/EOWR.pdf", 4_200_000))
//!     .await;
//!
//! println!("TOC entries: {}", processed.document.toc.len());
//! println!("Published: {:?}", processed.document.pub_date);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod patterns;
pub mod boundary;
pub mod cascade;
pub mod chunking;
pub mod classifier;
pub mod dates;
pub mod pipeline;
pub mod selector;
pub mod taxonomy;


pub use error::ExtractorError;
pub use config::{DatePolicy, ExtractorConfig};
pub use boundary::{BoundaryDetector, TocRegion};
pub use cascade::{CascadeOutcome, PatternCascade, TocStrategy};
pub use chunking::SectionChunker;
pub use classifier::{coverage, CategoryClassifier, CoverageReport};
pub use dates::{DateResolution, DateResolver, DateSource};
pub use pipeline::{DocumentPipeline, DocumentSource, PipelineWarning, ProcessedDocument, PAGE_BREAK};
pub use selector::{CandidateSelector, SelectionMode};
pub use taxonomy::Taxonomy;
