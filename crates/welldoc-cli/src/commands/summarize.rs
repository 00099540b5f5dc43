//! Summarize command implementation.

use crate::cli::SummarizeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::sync::Arc;
use tracing::info;
use welldoc_domain::traits::TextGenerator;
use welldoc_domain::{DocumentScope, SummaryRequest};
use welldoc_extractor::{CandidateSelector, SelectionMode};
use welldoc_llm::OllamaGenerator;
use welldoc_store::SqliteIndex;
use welldoc_synthesizer::{Summary, Synthesizer};

/// Execute the summarize command.
pub async fn execute_summarize(args: SummarizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let generator = OllamaGenerator::new(&config.generator.endpoint, &config.generator.model)
        .with_max_retries(config.generator.max_retries)
        .with_timeout(config.synthesizer.generation_timeout());

    let summary = run_summarize(&args, config, generator).await?;
    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}

/// Answer a request from the index at `args.db` with the given generator.
pub async fn run_summarize<G>(args: &SummarizeArgs, config: &Config, generator: G) -> Result<Summary>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: std::fmt::Display,
{
    let index = SqliteIndex::new(&args.db)?;
    let scope = resolve_scope(args, config, &index)?;

    let mut request = SummaryRequest::new(&args.well, &args.prompt, args.max_words);
    if let DocumentScope::Selected(name) = scope {
        info!("Well {}: answering from {}", args.well, name);
        request = request.with_document(name);
    }

    let synthesizer = Synthesizer::new(
        Arc::new(index),
        generator,
        Arc::new(config.intents()?),
        config.synthesizer.clone(),
    )?;
    Ok(synthesizer.summarize(request).await?)
}

/// Explicit document, every document, or the well's selected report
fn resolve_scope(args: &SummarizeArgs, config: &Config, index: &SqliteIndex) -> Result<DocumentScope> {
    if args.all_documents {
        return Ok(DocumentScope::All);
    }
    if let Some(name) = &args.document {
        return Ok(DocumentScope::Selected(name.clone()));
    }

    let candidates = index.load_documents(Some(&args.well))?;
    if candidates.is_empty() {
        return Err(CliError::InvalidInput(format!("Well {} is not indexed", args.well)));
    }
    let well = CandidateSelector::new(config.extractor.min_toc_entries).select(&args.well, candidates, SelectionMode::Single);
    Ok(well.selected.map(DocumentScope::Selected).unwrap_or_default())
}
