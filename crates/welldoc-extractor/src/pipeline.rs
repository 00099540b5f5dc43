//! Per-document metadata resolution
//!
//! ```text
//! structured pages ─┬─ boundary → cascade → classify ─┐
//!  (raw if empty) ──┘                                  ├─ Document record
//! structured text ── date resolver ── raw text if none ┘
//! ```

use crate::boundary::BoundaryDetector;
use crate::cascade::PatternCascade;
use crate::classifier::{CategoryClassifier, CoverageReport};
use crate::config::ExtractorConfig;
use crate::dates::{DateResolver, DateSource};
use crate::error::ExtractorError;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use welldoc_domain::traits::DocumentConverter;
use welldoc_domain::{Document, ParseMethod};

/// Form feed separating pages in raw text
pub const PAGE_BREAK: char = '\x0c';

/// One file to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    /// Well the file belongs to
    pub well_id: String,
    /// Location handed to the converter
    pub path: PathBuf,
    /// Size in bytes
    pub file_size: u64,
}

impl DocumentSource {
    /// Create a source description
    pub fn new(well_id: impl Into<String>, path: impl Into<PathBuf>, file_size: u64) -> Self {
        Self {
            well_id: well_id.into(),
            path: path.into(),
            file_size,
        }
    }

    /// File name without directories
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Non-fatal outcome recorded while processing a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// No TOC region or no strategy produced enough entries
    StructureNotFound,
    /// No date in either source
    DateNotResolved,
    /// A converter call failed or timed out
    CollaboratorUnavailable {
        /// Which call failed
        operation: String,
        /// Failure description
        reason: String,
    },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::StructureNotFound => f.write_str("structure not found"),
            PipelineWarning::DateNotResolved => f.write_str("date not resolved"),
            PipelineWarning::CollaboratorUnavailable { operation, reason } => {
                write!(f, "{} unavailable: {}", operation, reason)
            }
        }
    }
}

/// Metadata record plus processing diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDocument {
    /// The resolved metadata record
    pub document: Document,
    /// Classification coverage of this document's TOC
    pub coverage: CoverageReport,
    /// Non-fatal outcomes
    pub warnings: Vec<PipelineWarning>,
    /// Winning cascade strategy, if a TOC was found
    pub strategy: Option<String>,
}

/// Resolves metadata records from converter output
pub struct DocumentPipeline<C> {
    converter: Arc<C>,
    config: Arc<ExtractorConfig>,
    boundary: BoundaryDetector,
    cascade: Arc<PatternCascade>,
    classifier: CategoryClassifier,
    dates: DateResolver,
}

impl<C> Clone for DocumentPipeline<C> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
            config: Arc::clone(&self.config),
            boundary: self.boundary.clone(),
            cascade: Arc::clone(&self.cascade),
            classifier: self.classifier.clone(),
            dates: self.dates.clone(),
        }
    }
}

impl<C> DocumentPipeline<C>
where
    C: DocumentConverter + Send + Sync + 'static,
    C::Error: fmt::Display,
{
    /// Create a pipeline
    pub fn new(converter: C, taxonomy: Arc<Taxonomy>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            converter: Arc::new(converter),
            boundary: BoundaryDetector::new(config.heading_scan_lines, config.max_toc_window, config.min_toc_entries),
            cascade: Arc::new(PatternCascade::new(config.min_toc_entries, config.max_page)),
            classifier: CategoryClassifier::new(taxonomy),
            dates: DateResolver::new(&config),
            config: Arc::new(config),
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Process one file; collaborator failures degrade the record instead of failing
    pub async fn process(&self, source: &DocumentSource) -> ProcessedDocument {
        let filename = source.filename();
        info!("Processing {} ({})", filename, source.well_id);

        let mut warnings = Vec::new();
        let mut document = Document::new(
            source.well_id.clone(),
            filename.clone(),
            source.path.to_string_lossy().into_owned(),
            source.file_size,
        );

        let pages = match self.structured_pages(&source.path).await {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Structured conversion failed for {}: {}", filename, e);
                warnings.push(PipelineWarning::CollaboratorUnavailable {
                    operation: "structured_pages".to_string(),
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };
        let structured = pages.join("\n");
        let structured_empty = structured.trim().is_empty();
        document.is_scanned = structured_empty || self.looks_scanned(&pages);

        // Raw text is fetched at most once and only when needed
        let mut raw: Option<Option<String>> = None;

        let toc_text = if structured_empty {
            let raw_text = self.raw_front_matter(&source.path, &mut raw, &mut warnings).await;
            if raw_text.is_some() {
                document.parse_method = ParseMethod::Fallback;
                debug!("{}: structured text empty, using raw text", filename);
            }
            raw_text.unwrap_or_default()
        } else {
            structured.clone()
        };

        let lines: Vec<&str> = toc_text.lines().collect();
        let mut strategy = None;
        if let Some(region) = self.boundary.detect(&lines) {
            let outcome = self.cascade.extract(region.slice(&lines));
            strategy = outcome.strategy.map(str::to_string);
            document.toc = outcome.entries;
        }
        if document.toc.is_empty() {
            warnings.push(PipelineWarning::StructureNotFound);
        }

        let coverage = self.classifier.classify_entries(&mut document.toc);

        let resolution = match self.dates.resolve_source(&structured, DateSource::Primary) {
            Some(found) => Some(found),
            None => self
                .raw_front_matter(&source.path, &mut raw, &mut warnings)
                .await
                .and_then(|text| self.dates.resolve_source(&text, DateSource::Secondary)),
        };
        if let Some(found) = &resolution {
            debug!("{}: date {} from {:?} source", filename, found.date, found.source);
        }
        document.pub_date = resolution.map(|r| r.date);
        if document.pub_date.is_none() {
            warnings.push(PipelineWarning::DateNotResolved);
        }

        info!(
            "Processed {}: {} TOC entries ({}), date {}, {} warnings",
            filename,
            document.toc.len(),
            strategy.as_deref().unwrap_or("none"),
            document.pub_date.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string()),
            warnings.len()
        );

        ProcessedDocument {
            document,
            coverage,
            warnings,
            strategy,
        }
    }

    /// Process files concurrently (bounded by `concurrency`), results in input order
    pub async fn process_batch(&self, sources: Vec<DocumentSource>) -> Result<Vec<ProcessedDocument>, ExtractorError> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = JoinSet::new();

        for (idx, source) in sources.into_iter().enumerate() {
            let pipeline = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ExtractorError::Join(e.to_string()))?;
                Ok::<_, ExtractorError>((idx, pipeline.process(&source).await))
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (idx, processed) = joined.map_err(|e| ExtractorError::Join(e.to_string()))??;
            results.push((idx, processed));
        }

        results.sort_by_key(|(idx, _)| *idx);
        Ok(results.into_iter().map(|(_, p)| p).collect())
    }

    fn looks_scanned(&self, pages: &[String]) -> bool {
        if pages.is_empty() {
            return true;
        }
        let chars: usize = pages
            .iter()
            .map(|p| p.chars().filter(|c| !c.is_whitespace()).count())
            .sum();
        chars / pages.len() < self.config.scanned_chars_per_page
    }

    async fn structured_pages(&self, path: &Path) -> Result<Vec<String>, ExtractorError> {
        let max_pages = self.config.front_matter_pages;
        let path = path.to_path_buf();
        self.call(move |c| c.structured_pages(&path, max_pages)).await
    }

    /// Raw text of the front-matter pages, cached in `slot`
    async fn raw_front_matter(
        &self,
        path: &Path,
        slot: &mut Option<Option<String>>,
        warnings: &mut Vec<PipelineWarning>,
    ) -> Option<String> {
        if let Some(cached) = slot {
            return cached.clone();
        }

        let path_buf = path.to_path_buf();
        let fetched = match self.call(move |c| c.raw_text(&path_buf)).await {
            Ok(text) => {
                let front: Vec<&str> = text.split(PAGE_BREAK).take(self.config.front_matter_pages).collect();
                let joined = front.join("\n");
                (!joined.trim().is_empty()).then_some(joined)
            }
            Err(e) => {
                warn!("Raw text extraction failed for {}: {}", path.display(), e);
                warnings.push(PipelineWarning::CollaboratorUnavailable {
                    operation: "raw_text".to_string(),
                    reason: e.to_string(),
                });
                None
            }
        };

        *slot = Some(fetched.clone());
        fetched
    }

    /// Run a converter call on the blocking pool under the conversion timeout
    async fn call<T, F>(&self, op: F) -> Result<T, ExtractorError>
    where
        T: Send + 'static,
        F: FnOnce(&C) -> Result<T, C::Error> + Send + 'static,
    {
        let converter = Arc::clone(&self.converter);
        let task = tokio::task::spawn_blocking(move || {
            op(&converter).map_err(|e| ExtractorError::Conversion(e.to_string()))
        });

        timeout(self.config.conversion_timeout(), task)
            .await
            .map_err(|_| ExtractorError::Timeout)?
            .map_err(|e| ExtractorError::Join(e.to_string()))?
    }
}
