//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline error
    #[error(transparent)]
    Extractor(#[from] welldoc_extractor::ExtractorError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] welldoc_store::StoreError),

    /// Summarization error
    #[error(transparent)]
    Synthesizer(#[from] welldoc_synthesizer::SynthesizerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classification coverage under the requested threshold
    #[error("Coverage {ratio:.3} is below threshold {threshold:.3}")]
    CoverageBelow {
        /// Measured ratio
        ratio: f64,
        /// Required ratio
        threshold: f64,
    },
}
