//! Index command implementation.

use super::read_metadata;
use crate::cli::IndexArgs;
use crate::config::Config;
use crate::converter::TextDumpConverter;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use tracing::{info, warn};
use welldoc_domain::traits::ChunkIndex;
use welldoc_domain::Document;
use welldoc_extractor::{CandidateSelector, SectionChunker, SelectionMode};
use welldoc_store::SqliteIndex;

/// Execute the index command.
pub async fn execute_index(args: IndexArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let stats = run_index(&args, config)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Indexed {} chunks from {} documents of {} wells",
            stats.chunks, stats.documents, stats.wells
        ))
    );
    Ok(())
}

/// Counts of what was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Wells touched
    pub wells: usize,
    /// Documents chunked
    pub documents: usize,
    /// Chunks written
    pub chunks: usize,
}

/// Store every metadata record and chunk the chosen documents into the database.
///
/// Previously indexed chunks of the touched wells are replaced.
pub fn run_index(args: &IndexArgs, config: &Config) -> Result<IndexStats> {
    let documents = read_metadata(&args.metadata)?;
    let mut index = SqliteIndex::new(&args.db)?;
    let chunker = SectionChunker::new(config.extractor.chunk_words);
    let mode = if args.all_documents { SelectionMode::All } else { SelectionMode::Single };

    let mut stats = IndexStats::default();
    for well in CandidateSelector::new(config.extractor.min_toc_entries).select_all(documents, mode) {
        let removed = index.clear_well(&well.well_id)?;
        if removed > 0 {
            info!("Well {}: replaced {} chunks", well.well_id, removed);
        }
        stats.wells += 1;

        for document in &well.candidates {
            index.save_document(document)?;
            let chosen = well.selected.as_ref().is_none_or(|s| s == &document.filename);
            if !chosen {
                continue;
            }
            stats.chunks += index_document(&mut index, &chunker, document)?;
            stats.documents += 1;
        }
    }
    Ok(stats)
}

fn index_document(index: &mut SqliteIndex, chunker: &SectionChunker, document: &Document) -> Result<usize> {
    let pages = TextDumpConverter.all_pages(Path::new(&document.filepath))?;
    if pages.is_empty() {
        warn!("{}: no text to index", document.filename);
        return Ok(0);
    }

    let chunks = chunker.chunk(document, &pages);
    let count = chunks.len();
    for chunk in chunks {
        index.write(chunk)?;
    }
    info!("{}: {} chunks", document.filename, count);
    Ok(count)
}
