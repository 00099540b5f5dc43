//! Configuration for retrieval and summarization

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the retriever and summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Maximum text fragments retrieved per request
    pub text_limit: usize,

    /// Maximum table fragments retrieved per request
    pub table_limit: usize,

    /// Share of the word budget given to narrative text (rest goes to tables)
    pub text_share: f64,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Maximum time for one index query (milliseconds)
    pub index_timeout_ms: u64,

    /// Maximum time for one generator call (milliseconds)
    pub generation_timeout_ms: u64,

    /// Overall request deadline (milliseconds)
    ///
    /// Compression is skipped once it has passed and otherwise gets only the
    /// time that is left.
    pub request_deadline_ms: u64,
}

impl SynthesizerConfig {
    /// Get the index query timeout as a Duration
    pub fn index_timeout(&self) -> Duration {
        Duration::from_millis(self.index_timeout_ms)
    }

    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    /// Get the request deadline as a Duration
    pub fn request_deadline(&self) -> Duration {
        Duration::from_millis(self.request_deadline_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.text_limit == 0 && self.table_limit == 0 {
            return Err("text_limit and table_limit cannot both be 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.text_share) {
            return Err("text_share must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.index_timeout_ms == 0 {
            return Err("index_timeout_ms must be greater than 0".to_string());
        }
        if self.generation_timeout_ms == 0 {
            return Err("generation_timeout_ms must be greater than 0".to_string());
        }
        if self.request_deadline_ms == 0 {
            return Err("request_deadline_ms must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            text_limit: 10,
            table_limit: 5,
            text_share: 0.7,
            temperature: 0.1,
            index_timeout_ms: 30_000,
            generation_timeout_ms: 120_000,
            request_deadline_ms: 300_000,
        }
    }
}
