//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Welldoc - recover report structure and summarize well documentation.
#[derive(Debug, Parser)]
#[command(name = "welldoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WELLDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve metadata records for every report under a directory
    Extract(ExtractArgs),

    /// Pick the representative report of each well
    Select(SelectArgs),

    /// Measure how many TOC titles the taxonomy classifies
    Coverage(CoverageArgs),

    /// Chunk reports and write them to the index
    Index(IndexArgs),

    /// Generate a budgeted, cited summary for a well
    Summarize(SummarizeArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Root directory; each report's parent directory names its well
    pub dir: PathBuf,

    /// Metadata file to write
    #[arg(short, long, default_value = "metadata.json")]
    pub output: PathBuf,
}

/// Arguments for the select command.
#[derive(Debug, Parser)]
pub struct SelectArgs {
    /// Metadata file written by `extract`
    pub metadata: PathBuf,

    /// Keep every candidate instead of naming one per well
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the coverage command.
#[derive(Debug, Parser)]
pub struct CoverageArgs {
    /// Metadata file written by `extract`
    pub metadata: PathBuf,

    /// Fail when the categorized share is below this ratio (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

/// Arguments for the index command.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Metadata file written by `extract`
    pub metadata: PathBuf,

    /// SQLite database holding records and chunks
    #[arg(long, default_value = "welldoc.db")]
    pub db: PathBuf,

    /// Index every candidate, not only the selected report of each well
    #[arg(long)]
    pub all_documents: bool,
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
pub struct SummarizeArgs {
    /// SQLite database written by `index`
    #[arg(long, default_value = "welldoc.db")]
    pub db: PathBuf,

    /// Well to summarize
    #[arg(short, long)]
    pub well: String,

    /// What to summarize
    #[arg(short, long)]
    pub prompt: String,

    /// Word limit of the answer
    #[arg(short, long, default_value = "200")]
    pub max_words: usize,

    /// Restrict to this document instead of the selected one
    #[arg(short, long, conflicts_with = "all_documents")]
    pub document: Option<String>,

    /// Draw from every indexed document of the well
    #[arg(long)]
    pub all_documents: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from(["welldoc", "extract", "reports", "-o", "out.json"]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.dir, PathBuf::from("reports"));
                assert_eq!(args.output, PathBuf::from("out.json"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_summarize_defaults() {
        let cli = Cli::parse_from(["welldoc", "summarize", "--well", "NLW-GT-01", "--prompt", "casing"]);
        match cli.command {
            Command::Summarize(args) => {
                assert_eq!(args.max_words, 200);
                assert!(!args.all_documents);
                assert!(args.document.is_none());
            }
            _ => panic!("Expected Summarize command"),
        }
    }

    #[test]
    fn test_document_conflicts_with_all_documents() {
        let result = Cli::try_parse_from([
            "welldoc", "summarize", "-w", "W", "-p", "p", "--document", "a.pdf", "--all-documents",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["welldoc", "select", "m.json", "--format", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
