//! Welldoc Generator Layer
//!
//! Pluggable text-generator implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `TextGenerator` trait from `welldoc-domain`.
//! It supports multiple backends with a common interface.
//!
//! # Providers
//!
//! - `MockGenerator`: Deterministic mock for testing
//! - `OllamaGenerator`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use welldoc_llm::MockGenerator;
//! use welldoc_domain::traits::TextGenerator;
//!
//! let generator = MockGenerator::new("Hello from LLM!");
//! let result = generator.generate("system", "user", 0.1).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use welldoc_domain::traits::TextGenerator;

pub use ollama::OllamaGenerator;

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One recorded generator call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// System instruction
    pub system: String,
    /// User instruction
    pub user: String,
    /// Sampling temperature
    pub temperature: f32,
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<String>,
    by_marker: HashMap<String, String>,
    failing_markers: Vec<String>,
    calls: Vec<RecordedCall>,
}

/// Mock generator for deterministic testing
///
/// Answers are picked in this order: an error if the user instruction contains
/// a failing marker, the response registered for a contained marker, the next
/// scripted response, then the default response. No network calls are made.
///
/// # Examples
///
/// ```
/// use welldoc_llm::MockGenerator;
/// use welldoc_domain::traits::TextGenerator;
///
/// let generator = MockGenerator::default()
///     .with_script(["first draft", "compressed"]);
/// assert_eq!(generator.generate("s", "u", 0.0).unwrap(), "first draft");
/// assert_eq!(generator.generate("s", "u", 0.0).unwrap(), "compressed");
/// assert_eq!(generator.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockGenerator {
    /// Create a new MockGenerator with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue responses returned in order before falling back to the default
    pub fn with_script<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut state) = self.state.lock() {
            state.scripted.extend(responses.into_iter().map(Into::into));
        }
        self
    }

    /// Answer `response` whenever the user instruction contains `marker`
    pub fn add_response(&mut self, marker: impl Into<String>, response: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.by_marker.insert(marker.into(), response.into());
        }
    }

    /// Fail whenever the user instruction contains `marker`
    pub fn add_error(&mut self, marker: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.failing_markers.push(marker.into());
        }
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state.lock().map(|s| s.calls.len()).unwrap_or(0)
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockGenerator {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str, temperature: f32) -> Result<String, Self::Error> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LlmError::Other(format!("Mock state poisoned: {}", e)))?;

        state.calls.push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
            temperature,
        });

        if state.failing_markers.iter().any(|m| user.contains(m.as_str())) {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        let by_marker = state
            .by_marker
            .iter()
            .find(|(marker, _)| user.contains(marker.as_str()))
            .map(|(_, response)| response.clone());
        if let Some(response) = by_marker {
            return Ok(response);
        }

        if let Some(next) = state.scripted.pop_front() {
            return Ok(next);
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_generator_default() {
        let generator = MockGenerator::new("Test response");
        let result = generator.generate("sys", "any prompt", 0.1);
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_generator_marker_responses() {
        let mut generator = MockGenerator::default();
        generator.add_response("casing", "casing answer");
        generator.add_response("geology", "geology answer");

        assert_eq!(generator.generate("s", "about casing", 0.0).unwrap(), "casing answer");
        assert_eq!(generator.generate("s", "about geology", 0.0).unwrap(), "geology answer");
        assert_eq!(generator.generate("s", "unknown", 0.0).unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_generator_script_then_default() {
        let generator = MockGenerator::new("fallback").with_script(["one", "two"]);
        assert_eq!(generator.generate("s", "u", 0.0).unwrap(), "one");
        assert_eq!(generator.generate("s", "u", 0.0).unwrap(), "two");
        assert_eq!(generator.generate("s", "u", 0.0).unwrap(), "fallback");
    }

    #[test]
    fn test_mock_generator_records_calls() {
        let generator = MockGenerator::new("x");
        generator.generate("system text", "user text", 0.2).unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "system text");
        assert_eq!(calls[0].user, "user text");
        assert!((calls[0].temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mock_generator_error() {
        let mut generator = MockGenerator::default();
        generator.add_error("bad prompt");

        let result = generator.generate("s", "a bad prompt", 0.0);
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mock_generator_clone_shares_state() {
        let g1 = MockGenerator::new("test");
        let g2 = g1.clone();

        g1.generate("s", "u", 0.0).unwrap();

        assert_eq!(g1.call_count(), 1);
        assert_eq!(g2.call_count(), 1);
    }
}
