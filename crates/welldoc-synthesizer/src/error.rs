//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that end a summary request
///
/// A single failed retrieval channel or a skipped compression pass degrade the
/// summary with a warning instead.
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Request failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Both retrieval channels failed
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Text generator failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Collaborator call exceeded its timeout
    #[error("Timeout during {0}")]
    Timeout(String),

    /// Index returned no fragments for the request
    #[error("No indexed fragments for well {0} match the request")]
    NoContext(String),

    /// Configuration or intent table error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker task failed to join
    #[error("Task join error: {0}")]
    Join(String),
}
