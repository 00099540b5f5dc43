//! Choosing the representative document of a well

use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;
use welldoc_domain::{Document, Well};

static FINAL_REPORT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)final|eowr|eojr|end[\s_\-]*of[\s_\-]*(?:well|job)").expect("valid regex")
});

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Whether candidates are reduced to one canonical document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Keep the ranking and name the best candidate as selected
    #[default]
    Single,
    /// Keep every candidate; nothing is marked as selected
    All,
}

/// Scores and ranks candidate documents of a well
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    min_toc_entries: usize,
}

impl CandidateSelector {
    /// Create a selector; a TOC with at least `min_toc_entries` earns the structure bonus
    pub fn new(min_toc_entries: usize) -> Self {
        Self { min_toc_entries }
    }

    /// Score of one document (higher is better)
    ///
    /// +1000 for a usable TOC, +(year − 1900) for a dated document, +size in MB
    /// and +100 for a final-report file name.
    pub fn score(&self, document: &Document) -> f64 {
        let mut score = 0.0;
        if document.has_usable_toc(self.min_toc_entries) {
            score += 1000.0;
        }
        if let Some(year) = document.pub_year() {
            score += f64::from(year - 1900);
        }
        score += document.file_size as f64 / BYTES_PER_MB;
        if FINAL_REPORT_NAME.is_match(&document.filename) {
            score += 100.0;
        }
        score
    }

    /// Candidates ordered best first; equal scores fall back to filename, then full path
    pub fn rank(&self, candidates: Vec<Document>) -> Vec<(Document, f64)> {
        let mut scored: Vec<(Document, f64)> = candidates
            .into_iter()
            .map(|d| {
                let s = self.score(&d);
                (d, s)
            })
            .collect();

        scored.sort_by(|(a, sa), (b, sb)| match sb.total_cmp(sa) {
            Ordering::Equal => a.filename.cmp(&b.filename).then_with(|| a.filepath.cmp(&b.filepath)),
            other => other,
        });
        scored
    }

    /// Build the well record for candidates sharing `well_id`
    pub fn select(&self, well_id: &str, candidates: Vec<Document>, mode: SelectionMode) -> Well {
        let ranked = self.rank(candidates);
        let selected = match mode {
            SelectionMode::Single => ranked.first().map(|(d, _)| d.filename.clone()),
            SelectionMode::All => None,
        };

        if let Some(name) = &selected {
            debug!("Well {}: selected {} of {} candidates", well_id, name, ranked.len());
        }

        Well {
            well_id: well_id.to_string(),
            candidates: ranked.into_iter().map(|(d, _)| d).collect(),
            selected,
        }
    }

    /// Group records by well and select within each group, ordered by well id
    pub fn select_all(&self, documents: Vec<Document>, mode: SelectionMode) -> Vec<Well> {
        let mut groups: BTreeMap<String, Vec<Document>> = BTreeMap::new();
        for doc in documents {
            groups.entry(doc.well_id.clone()).or_default().push(doc);
        }
        groups
            .into_iter()
            .map(|(well_id, docs)| self.select(&well_id, docs, mode))
            .collect()
    }
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new(3)
    }
}
