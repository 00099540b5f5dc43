//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building or running the pipeline
///
/// A missing TOC, an unresolved date or an uncategorized entry are normal
/// outcomes and are never reported through this type.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Conversion engine failed for every source of a document
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Collaborator call exceeded its timeout
    #[error("Conversion timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Taxonomy file could not be parsed or is inconsistent
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// Worker task failed to join
    #[error("Task join error: {0}")]
    Join(String),
}
