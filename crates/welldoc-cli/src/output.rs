//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use welldoc_domain::Well;
use welldoc_extractor::{CoverageReport, ProcessedDocument};
use welldoc_synthesizer::Summary;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format pipeline results.
    pub fn format_processed(&self, processed: &[ProcessedDocument]) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(processed),
            OutputFormat::Quiet => Ok(processed
                .iter()
                .map(|p| p.document.filename.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if processed.is_empty() {
                    return Ok(self.colorize("No reports found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Well", "File", "Date", "Method", "TOC", "Strategy", "Coverage", "Warnings"]);
                for p in processed {
                    let doc = &p.document;
                    builder.push_record([
                        doc.well_id.clone(),
                        doc.filename.clone(),
                        doc.pub_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                        doc.parse_method.as_str().to_string(),
                        doc.toc.len().to_string(),
                        p.strategy.clone().unwrap_or_else(|| "-".to_string()),
                        format!("{:.0}%", p.coverage.ratio() * 100.0),
                        p.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>().join("; "),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format per-well selections.
    pub fn format_wells(&self, wells: &[Well]) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(wells),
            OutputFormat::Quiet => Ok(wells
                .iter()
                .filter_map(|w| w.selected.as_ref().map(|s| format!("{}\t{}", w.well_id, s)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if wells.is_empty() {
                    return Ok(self.colorize("No wells found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Well", "Rank", "File", "Date", "TOC", "Selected"]);
                for well in wells {
                    for (rank, doc) in well.candidates.iter().enumerate() {
                        let selected = well.selected.as_deref() == Some(doc.filename.as_str());
                        builder.push_record([
                            well.well_id.clone(),
                            (rank + 1).to_string(),
                            doc.filename.clone(),
                            doc.pub_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                            doc.toc.len().to_string(),
                            if selected { "*".to_string() } else { String::new() },
                        ]);
                    }
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a coverage report.
    pub fn format_coverage(&self, report: &CoverageReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(report),
            OutputFormat::Quiet => Ok(format!("{:.4}", report.ratio())),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Entries"]);
                for (category, count) in &report.per_category {
                    builder.push_record([category.to_string(), count.to_string()]);
                }
                builder.push_record(["(uncategorized)".to_string(), report.uncategorized.len().to_string()]);

                let mut out = render(builder);
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "{} of {} entries categorized ({:.1}%)",
                    report.categorized,
                    report.total,
                    report.ratio() * 100.0
                )));
                Ok(out)
            }
        }
    }

    /// Format a generated summary with its citations.
    pub fn format_summary(&self, summary: &Summary) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(summary),
            OutputFormat::Quiet => Ok(summary.text.clone()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&summary.text);
                out.push_str("\n\n");

                let mut status = format!("{} words (budget {} text / {} table)", summary.word_count, summary.budget.text, summary.budget.table);
                if summary.compressed {
                    status.push_str(", compressed");
                }
                if summary.truncated {
                    status.push_str(", truncated");
                }
                out.push_str(&self.info(&status));
                out.push('\n');

                for warning in &summary.warnings {
                    out.push_str(&self.warning(&warning.to_string()));
                    out.push('\n');
                }

                if !summary.text_sources.is_empty() || !summary.table_sources.is_empty() {
                    out.push_str(&self.colorize("Sources:", "cyan"));
                    out.push('\n');
                    for (i, source) in summary.text_sources.iter().enumerate() {
                        out.push_str(&format!("  [{}] {}\n", i + 1, source));
                    }
                    for (i, source) in summary.table_sources.iter().enumerate() {
                        out.push_str(&format!("  [T{}] {}\n", i + 1, source));
                    }
                }
                Ok(out.trim_end().to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
