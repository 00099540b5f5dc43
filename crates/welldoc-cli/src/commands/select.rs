//! Select command implementation.

use super::read_metadata;
use crate::cli::SelectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use welldoc_extractor::{CandidateSelector, SelectionMode};

/// Execute the select command.
pub async fn execute_select(args: SelectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let documents = read_metadata(&args.metadata)?;
    let mode = if args.all { SelectionMode::All } else { SelectionMode::Single };

    let wells = CandidateSelector::new(config.extractor.min_toc_entries).select_all(documents, mode);
    println!("{}", formatter.format_wells(&wells)?);
    Ok(())
}
