//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use welldoc_extractor::{ExtractorConfig, Taxonomy};
use welldoc_synthesizer::{IntentTable, SynthesizerConfig};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Document pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Retrieval and summarization settings
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,

    /// Text generator endpoint
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Custom keyword tables; the built-in ones are used when unset
    #[serde(default)]
    pub tables: TablePaths,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Ollama connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Attempts per request
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Optional keyword table files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePaths {
    /// Section taxonomy (TOC title keywords)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,

    /// Prompt intent table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".welldoc").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("extractor: {}", e)))?;
        self.synthesizer
            .validate()
            .map_err(|e| CliError::Config(format!("synthesizer: {}", e)))?;
        Ok(())
    }

    /// The configured taxonomy, or the built-in one.
    pub fn taxonomy(&self) -> Result<Taxonomy> {
        Ok(match &self.tables.taxonomy {
            Some(path) => Taxonomy::load(path)?,
            None => Taxonomy::builtin()?,
        })
    }

    /// The configured intent table, or the built-in one.
    pub fn intents(&self) -> Result<IntentTable> {
        Ok(match &self.tables.intents {
            Some(path) => IntentTable::load(path)?,
            None => IntentTable::builtin()?,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_retries: default_retries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_retries() -> u32 {
    3
}
