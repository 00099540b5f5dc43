//! Coverage command implementation.

use super::read_metadata;
use crate::cli::CoverageArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use welldoc_extractor::{coverage, CoverageReport};

/// Execute the coverage command.
pub async fn execute_coverage(args: CoverageArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = run_coverage(&args, config)?;
    println!("{}", formatter.format_coverage(&report)?);

    if let Some(threshold) = args.threshold {
        if !report.meets(threshold) {
            return Err(CliError::CoverageBelow {
                ratio: report.ratio(),
                threshold,
            });
        }
    }
    Ok(())
}

/// Reclassify every TOC title of a metadata file with the configured taxonomy.
pub fn run_coverage(args: &CoverageArgs, config: &Config) -> Result<CoverageReport> {
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CliError::InvalidInput("threshold must be between 0.0 and 1.0".to_string()));
        }
    }

    let documents = read_metadata(&args.metadata)?;
    let taxonomy = config.taxonomy()?;
    let titles = documents.iter().flat_map(|d| d.toc.iter().map(|e| e.title.as_str()));
    Ok(coverage(&taxonomy, titles))
}
