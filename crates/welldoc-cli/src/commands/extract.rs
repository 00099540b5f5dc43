//! Extract command implementation.

use super::write_metadata;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::converter::{discover, TextDumpConverter};
use crate::error::Result;
use crate::output::Formatter;
use std::sync::Arc;
use tracing::info;
use welldoc_extractor::{DocumentPipeline, ProcessedDocument};

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let processed = run_extract(&args, config).await?;
    println!("{}", formatter.format_processed(&processed)?);
    Ok(())
}

/// Run the pipeline over every report under `args.dir` and write the metadata file.
pub async fn run_extract(args: &ExtractArgs, config: &Config) -> Result<Vec<ProcessedDocument>> {
    let sources = discover(&args.dir)?;
    info!("Found {} reports under {}", sources.len(), args.dir.display());

    let pipeline = DocumentPipeline::new(TextDumpConverter, Arc::new(config.taxonomy()?), config.extractor.clone())?;
    let processed = pipeline.process_batch(sources).await?;

    let documents: Vec<_> = processed.iter().map(|p| p.document.clone()).collect();
    write_metadata(&args.output, &documents)?;
    info!("Wrote {} records to {}", documents.len(), args.output.display());

    Ok(processed)
}
