//! Configuration for the document pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which date wins when several candidates survive the year-range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Earliest candidate (original issue date rather than later revisions)
    #[default]
    Earliest,
    /// Latest candidate
    Latest,
}

/// Configuration for the document pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Number of leading pages fetched as structured text
    pub front_matter_pages: usize,

    /// Lines scanned for a contents heading
    pub heading_scan_lines: usize,

    /// Maximum TOC region length (lines)
    pub max_toc_window: usize,

    /// Minimum entries for a strategy result to count as a TOC
    pub min_toc_entries: usize,

    /// Page-count sanity ceiling for TOC page numbers
    pub max_page: u32,

    /// Leading lines scanned for bare dates when no keyword context matched
    pub standalone_date_lines: usize,

    /// Lines after a keyword hit that are searched for a date
    pub date_context_lines: usize,

    /// Earliest accepted publication year
    pub min_year: i32,

    /// Latest accepted publication year
    pub max_year: i32,

    /// Which surviving date candidate is returned
    pub date_policy: DatePolicy,

    /// Maximum time for a single conversion call (seconds)
    pub conversion_timeout_secs: u64,

    /// Average non-whitespace characters per page below which a file counts as scanned
    pub scanned_chars_per_page: usize,

    /// Documents processed concurrently by `process_batch`
    pub concurrency: usize,

    /// Word limit for packed text chunks
    pub chunk_words: usize,
}

impl ExtractorConfig {
    /// Get the conversion timeout as a Duration
    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.conversion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.front_matter_pages == 0 {
            return Err("front_matter_pages must be greater than 0".to_string());
        }
        if self.heading_scan_lines == 0 {
            return Err("heading_scan_lines must be greater than 0".to_string());
        }
        if self.max_toc_window == 0 {
            return Err("max_toc_window must be greater than 0".to_string());
        }
        if self.min_toc_entries == 0 {
            return Err("min_toc_entries must be greater than 0".to_string());
        }
        if self.max_page == 0 {
            return Err("max_page must be greater than 0".to_string());
        }
        if self.min_year > self.max_year {
            return Err("min_year cannot exceed max_year".to_string());
        }
        if self.conversion_timeout_secs == 0 {
            return Err("conversion_timeout_secs must be greater than 0".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.chunk_words == 0 {
            return Err("chunk_words must be greater than 0".to_string());
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            front_matter_pages: 4,
            heading_scan_lines: 100,
            max_toc_window: 150,
            min_toc_entries: 3,
            max_page: 2000,
            standalone_date_lines: 20,
            date_context_lines: 2,
            min_year: 1950,
            max_year: 2100,
            date_policy: DatePolicy::Earliest,
            conversion_timeout_secs: 60,
            scanned_chars_per_page: 200,
            concurrency: 4,
            chunk_words: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.front_matter_pages, 4);
        assert_eq!(config.max_toc_window, 150);
        assert_eq!(config.date_policy, DatePolicy::Earliest);
    }

    #[test]
    fn test_invalid_year_range() {
        let config = ExtractorConfig {
            min_year: 2100,
            max_year: 1950,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_concurrency() {
        let config = ExtractorConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("date_policy = \"latest\"\nmax_page = 500\n").unwrap();
        assert_eq!(config.date_policy, DatePolicy::Latest);
        assert_eq!(config.max_page, 500);
        assert_eq!(config.min_toc_entries, 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
