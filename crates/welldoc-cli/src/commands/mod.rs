//! Command implementations.

pub mod coverage;
pub mod extract;
pub mod index;
pub mod select;
pub mod summarize;

pub use self::coverage::execute_coverage;
pub use self::extract::execute_extract;
pub use self::index::execute_index;
pub use self::select::execute_select;
pub use self::summarize::execute_summarize;

use crate::error::Result;
use std::fs;
use std::path::Path;
use welldoc_domain::Document;

/// Read a metadata file written by `extract`.
pub fn read_metadata(path: &Path) -> Result<Vec<Document>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write metadata records as pretty JSON.
pub fn write_metadata(path: &Path, documents: &[Document]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(documents)?)?;
    Ok(())
}
