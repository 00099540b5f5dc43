//! Category classification of TOC titles and coverage tracking

use crate::taxonomy::{normalize_title, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use welldoc_domain::keyword::contains_phrase;
use welldoc_domain::{Category, TocEntry};

/// Categorized versus total entries over some corpus
///
/// Falling coverage after a taxonomy change means the keyword table drifted
/// away from the documents it is supposed to describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Entries examined
    pub total: usize,
    /// Entries that received a category
    pub categorized: usize,
    /// Categorized entries per category
    pub per_category: BTreeMap<Category, usize>,
    /// Titles left unclassified, in the order seen
    pub uncategorized: Vec<String>,
}

impl CoverageReport {
    /// Record one classification outcome
    pub fn record(&mut self, title: &str, category: Option<Category>) {
        self.total += 1;
        match category {
            Some(c) => {
                self.categorized += 1;
                *self.per_category.entry(c).or_insert(0) += 1;
            }
            None => self.uncategorized.push(title.to_string()),
        }
    }

    /// Share of categorized entries (1.0 for an empty corpus)
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.categorized as f64 / self.total as f64
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &CoverageReport) {
        self.total += other.total;
        self.categorized += other.categorized;
        for (category, count) in &other.per_category {
            *self.per_category.entry(*category).or_insert(0) += count;
        }
        self.uncategorized.extend(other.uncategorized.iter().cloned());
    }

    /// Whether the ratio reaches `threshold`
    pub fn meets(&self, threshold: f64) -> bool {
        self.ratio() >= threshold
    }
}

/// Maps TOC titles to categories using a shared taxonomy
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl CategoryClassifier {
    /// Create a classifier over a taxonomy
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// The taxonomy in use
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Category of a title, or `None` when no keyword applies
    ///
    /// Exact title matches across every category are tried before keyword
    /// matches inside the title, which must fall on word boundaries; within
    /// each pass the taxonomy order decides.
    pub fn classify(&self, title: &str) -> Option<Category> {
        let title = normalize_title(title);
        if title.is_empty() {
            return None;
        }

        let categories = &self.taxonomy.categories;
        categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| *k == title))
            .or_else(|| categories.iter().find(|c| c.keywords.iter().any(|k| contains_phrase(&title, k))))
            .map(|c| c.category)
    }

    /// Assign categories in place and report coverage for these entries
    ///
    /// Entries with no match keep `category: None`.
    pub fn classify_entries(&self, entries: &mut [TocEntry]) -> CoverageReport {
        let mut report = CoverageReport::default();
        for entry in entries.iter_mut() {
            entry.category = self.classify(&entry.title);
            report.record(&entry.title, entry.category);
        }
        report
    }
}

/// Coverage of a taxonomy over a fixed corpus of titles
///
/// Pure: same table and corpus always give the same report.
pub fn coverage<I, S>(taxonomy: &Taxonomy, corpus: I) -> CoverageReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let classifier = CategoryClassifier::new(Arc::new(taxonomy.clone()));
    let mut report = CoverageReport::default();
    for title in corpus {
        let title = title.as_ref();
        report.record(title, classifier.classify(title));
    }
    report
}
