//! TOC region detection inside a document's front matter

use crate::patterns::{is_contents_keyword, is_entry_shape, is_structural_heading};
use tracing::debug;

/// How the start of a region was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionAnchor {
    /// A contents heading such as "Table of Contents" or "Inhoudsopgave"
    Heading,
    /// A run of entry-shaped lines with no heading
    Implicit,
}

/// A half-open line range `[start, end)` holding the TOC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocRegion {
    /// First line of the region
    pub start: usize,
    /// One past the last line of the region
    pub end: usize,
    /// How the start was found
    pub anchor: RegionAnchor,
}

impl TocRegion {
    /// The region's lines
    pub fn slice<'a, 'b>(&self, lines: &'a [&'b str]) -> &'a [&'b str] {
        let end = self.end.min(lines.len());
        let start = self.start.min(end);
        &lines[start..end]
    }

    /// Number of lines in the region
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the region holds no lines
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locates the TOC region in front-matter lines
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    heading_scan_lines: usize,
    max_window: usize,
    min_run: usize,
}

impl BoundaryDetector {
    /// Create a detector
    ///
    /// - `heading_scan_lines`: leading lines searched for a contents heading
    /// - `max_window`: maximum region length
    /// - `min_run`: entry-shaped lines needed for an implicit region
    pub fn new(heading_scan_lines: usize, max_window: usize, min_run: usize) -> Self {
        Self {
            heading_scan_lines,
            max_window,
            min_run: min_run.max(1),
        }
    }

    /// Find the TOC region, or `None` when the document has no recognisable TOC
    pub fn detect(&self, lines: &[&str]) -> Option<TocRegion> {
        let (start, anchor) = match self.find_heading(lines) {
            Some(idx) => (idx + 1, RegionAnchor::Heading),
            None => (self.find_implicit_run(lines)?, RegionAnchor::Implicit),
        };

        let end = self.find_end(lines, start);
        debug!("TOC region {:?} at lines {}..{}", anchor, start, end);

        Some(TocRegion { start, end, anchor })
    }

    fn find_heading(&self, lines: &[&str]) -> Option<usize> {
        lines
            .iter()
            .take(self.heading_scan_lines)
            .position(|line| is_contents_keyword(line))
    }

    fn find_implicit_run(&self, lines: &[&str]) -> Option<usize> {
        let mut run_start = None;
        let mut run_len = 0;

        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if is_entry_shape(line) {
                if run_len == 0 {
                    run_start = Some(idx);
                }
                run_len += 1;
                if run_len >= self.min_run {
                    return run_start;
                }
            } else {
                run_len = 0;
                run_start = None;
            }
        }
        None
    }

    fn find_end(&self, lines: &[&str], start: usize) -> usize {
        let limit = start.saturating_add(self.max_window).min(lines.len());
        let mut seen_entry = false;

        for (idx, line) in lines.iter().enumerate().take(limit).skip(start) {
            if is_entry_shape(line) {
                seen_entry = true;
                continue;
            }
            // A heading before the first entry is the listing's own caption row
            if seen_entry && is_structural_heading(line) {
                return idx;
            }
        }
        limit
    }
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new(100, 150, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_heading_anchored_region() {
        let text = "Company Ltd\nEnd of Well Report\n\nTABLE OF CONTENTS\n1 Introduction ..... 3\n2 Geology ..... 5\n3 Casing ..... 9\n\n1 INTRODUCTION\nThe well was drilled";
        let l = lines(text);
        let region = BoundaryDetector::default().detect(&l).unwrap();

        assert_eq!(region.anchor, RegionAnchor::Heading);
        assert_eq!(region.start, 4);
        assert_eq!(region.end, 8);
        assert_eq!(region.slice(&l)[0], "1 Introduction ..... 3");
    }

    #[test]
    fn test_dutch_heading() {
        let l = lines("Inhoudsopgave\n1 Inleiding    2\n2 Geologie    4");
        let region = BoundaryDetector::default().detect(&l).unwrap();
        assert_eq!(region.start, 1);
        assert_eq!(region.end, 3);
    }

    #[test]
    fn test_implicit_region_without_heading() {
        let text = "Report\n1 Introduction    3\n\n2 Geology    5\n3 Casing    9\n4 Completion    12";
        let l = lines(text);
        let region = BoundaryDetector::default().detect(&l).unwrap();
        assert_eq!(region.anchor, RegionAnchor::Implicit);
        assert_eq!(region.start, 1);
        assert_eq!(region.end, l.len());
    }

    #[test]
    fn test_two_entry_lines_are_not_a_region() {
        let l = lines("Report\n1 Introduction    3\n2 Geology    5\nbody text");
        assert!(BoundaryDetector::default().detect(&l).is_none());
    }

    #[test]
    fn test_window_caps_region() {
        let mut text = String::from("CONTENTS\n");
        for i in 1..=300 {
            text.push_str(&format!("{} Section ..... {}\n", i % 999, i));
        }
        let l = lines(&text);
        let region = BoundaryDetector::new(100, 150, 3).detect(&l).unwrap();
        assert_eq!(region.len(), 150);
    }

    #[test]
    fn test_heading_outside_scan_window_is_ignored() {
        let mut text = "filler\n".repeat(120);
        text.push_str("CONTENTS\n");
        let l = lines(&text);
        assert!(BoundaryDetector::default().detect(&l).is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(BoundaryDetector::default().detect(&[]).is_none());
    }
}
