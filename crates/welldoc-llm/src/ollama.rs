//! Ollama Generator Implementation
//!
//! Provides integration with Ollama's local generate API.
//!
//! # Features
//!
//! - Configurable endpoint and model
//! - System instruction and sampling temperature passed through `options`
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! The generator trait is synchronous and is driven from a blocking task by the
//! summarizer, so this provider uses reqwest's blocking client. The client is
//! created per call so it is never built or dropped on an async worker thread.
//!
//! # Examples
//!
//! ```no_run
//! use welldoc_llm::OllamaGenerator;
//! use welldoc_domain::traits::TextGenerator;
//!
//! let generator = OllamaGenerator::new("http://localhost:11434", "llama3");
//! let text = generator.generate("You summarize well reports.", "Summarize ...", 0.1);
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use welldoc_domain::traits::TextGenerator;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per generation
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API generator for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    endpoint: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaGenerator {
    /// Create a new Ollama generator
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a generator against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn send_once(
        &self,
        client: &reqwest::blocking::Client,
        body: &OllamaGenerateRequest<'_>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let response = client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<OllamaGenerateResponse>()
            .map(|r| r.response)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl TextGenerator for OllamaGenerator {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str, temperature: f32) -> Result<String, Self::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Client setup failed: {}", e)))?;

        let body = OllamaGenerateRequest {
            model: &self.model,
            system,
            prompt: user,
            stream: false,
            options: OllamaOptions { temperature },
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send_once(&client, &body) {
                Ok(text) => {
                    debug!("Ollama returned {} chars", text.len());
                    return Ok(text);
                }
                // Retrying cannot fix a missing model or a malformed body
                Err(e @ LlmError::ModelNotAvailable(_)) | Err(e @ LlmError::InvalidResponse(_)) => {
                    return Err(e);
                }
                Err(e) => {
                    warn!("Ollama attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                std::thread::sleep(Duration::from_secs(2u64.pow(attempts - 1)));
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_generator_creation() {
        let generator = OllamaGenerator::new("http://localhost:11434/", "llama3");
        assert_eq!(generator.endpoint, "http://localhost:11434");
        assert_eq!(generator.model(), "llama3");
        assert_eq!(generator.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_generator_default_endpoint() {
        let generator = OllamaGenerator::default_endpoint("mistral");
        assert_eq!(generator.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_ollama_generator_builders() {
        let generator = OllamaGenerator::new(DEFAULT_ENDPOINT, "llama3")
            .with_max_retries(0)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(generator.max_retries, 1);
        assert_eq!(generator.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_request_body_shape() {
        let body = OllamaGenerateRequest {
            model: "llama3",
            system: "sys",
            prompt: "user",
            stream: false,
            options: OllamaOptions { temperature: 0.1 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["system"], "sys");
        assert_eq!(value["prompt"], "user");
        assert_eq!(value["stream"], false);
        assert!(value["options"]["temperature"].as_f64().unwrap() < 0.2);
    }

    #[test]
    fn test_ollama_error_handling() {
        // Port 9 (discard) on localhost is not an HTTP server
        let generator = OllamaGenerator::new("http://127.0.0.1:9", "llama3")
            .with_max_retries(1)
            .with_timeout(Duration::from_secs(2));

        let result = generator.generate("s", "test", 0.0);
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    #[ignore] // Only run when Ollama is available
    fn test_ollama_generate_integration() {
        let generator = OllamaGenerator::default_endpoint("llama3");
        if let Ok(text) = generator.generate("Be brief.", "Say 'hello' and nothing else", 0.0) {
            assert!(!text.is_empty());
        }
    }
}
