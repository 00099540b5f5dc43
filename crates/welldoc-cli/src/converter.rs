//! Text-dump conversion collaborator and report discovery.
//!
//! Reports are expected to have been converted beforehand: next to
//! `EOWR.pdf` sit `EOWR.structured.txt` (layout-preserving text, pages
//! separated by form feed) and `EOWR.raw.txt` (plain extraction). A missing
//! sidecar reads as empty text.

use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use welldoc_domain::traits::DocumentConverter;
use welldoc_extractor::{DocumentSource, PAGE_BREAK};

const REPORT_EXTENSION: &str = "pdf";

/// Reads pre-converted sidecar text files
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDumpConverter;

impl TextDumpConverter {
    /// Every page of the structured dump, or of the raw dump when the former is empty
    pub fn all_pages(&self, path: &Path) -> io::Result<Vec<String>> {
        let pages = self.structured_pages(path, usize::MAX)?;
        if pages.iter().any(|p| !p.trim().is_empty()) {
            return Ok(pages);
        }
        Ok(split_pages(&self.raw_text(path)?))
    }
}

impl DocumentConverter for TextDumpConverter {
    type Error = io::Error;

    fn structured_pages(&self, path: &Path, max_pages: usize) -> io::Result<Vec<String>> {
        let text = read_sidecar(&sidecar(path, "structured"))?;
        Ok(split_pages(&text).into_iter().take(max_pages).collect())
    }

    fn raw_text(&self, path: &Path) -> io::Result<String> {
        read_sidecar(&sidecar(path, "raw"))
    }
}

/// `dir/EOWR.pdf` → `dir/EOWR.<kind>.txt`
fn sidecar(path: &Path, kind: &str) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!("{}.{}.txt", stem, kind))
}

fn read_sidecar(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No sidecar {}", path.display());
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

fn split_pages(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(PAGE_BREAK).map(str::to_string).collect()
}

/// Reports under `root`, sorted by path; the parent directory name is the well id
pub fn discover(root: &Path) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        let is_report = entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION));
        if !is_report {
            continue;
        }

        let well_id = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_size = entry.metadata().map_err(io::Error::from)?.len();
        sources.push(DocumentSource::new(well_id, path, file_size));
    }
    Ok(sources)
}
