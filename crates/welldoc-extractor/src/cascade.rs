//! Pattern cascade: TOC lines to structured entries
//!
//! Each strategy scans the whole region on its own. Strategies are tried in a
//! fixed order from most to least specific and the first one producing enough
//! entries wins; results are never merged across strategies.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use welldoc_domain::TocEntry;

/// Filler glyphs allowed in dotted leaders
const FILLER: &[char] = &['.', '…', '_', '·'];

static DOTTED_LEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)*\.?)\s+(.+?)\s*(?:[.…_·]\s*){2,}(\d+)\s*$").expect("valid regex")
});

static WIDE_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)*\.?)\s+(.+?)\s{3,}(\d+)\s*$").expect("valid regex")
});

static LOOSE_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)*\.?)\s+(.+?)\s{2,}(\d+)\s*$").expect("valid regex")
});

/// Raw fields of a matched line before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Numeral as written
    pub number: String,
    /// Title as written
    pub title: String,
    /// Page token as written
    pub page: String,
}

impl RawEntry {
    fn new(number: &str, title: &str, page: &str) -> Self {
        Self {
            number: number.trim().to_string(),
            title: title.to_string(),
            page: page.trim().to_string(),
        }
    }

    /// Validate into an entry; `None` for anything implausible
    pub fn validate(self, max_page: u32) -> Option<TocEntry> {
        let page: u32 = self.page.parse().ok()?;
        if page > max_page {
            return None;
        }
        let title = self.title.trim().trim_end_matches(|c: char| FILLER.contains(&c) || c.is_whitespace());
        TocEntry::new(self.number, title, page).ok()
    }
}

/// One recognition strategy of the cascade
pub trait TocStrategy: Send + Sync {
    /// Stable strategy name for logs and reports
    fn name(&self) -> &'static str;

    /// Split one line into raw fields, if it has this strategy's shape
    fn match_line(&self, line: &str) -> Option<RawEntry>;

    /// Scan every line, keeping valid entries in source order
    fn attempt(&self, lines: &[&str], max_page: u32) -> Vec<TocEntry> {
        lines
            .iter()
            .filter_map(|line| self.match_line(line))
            .filter_map(|raw| raw.validate(max_page))
            .collect()
    }
}

fn regex_fields(re: &Regex, line: &str) -> Option<RawEntry> {
    let caps = re.captures(line)?;
    Some(RawEntry::new(&caps[1], &caps[2], &caps[3]))
}

/// `| 2.1 | Casing | 12 |` rows
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTable;

impl TocStrategy for DelimitedTable {
    fn name(&self) -> &'static str {
        "delimited_table"
    }

    fn match_line(&self, line: &str) -> Option<RawEntry> {
        if !line.contains('|') {
            return None;
        }
        let cells: Vec<&str> = line.split('|').map(str::trim).filter(|c| !c.is_empty()).collect();
        if cells.len() < 3 {
            return None;
        }
        let title = cells[1..cells.len() - 1].join(" ");
        Some(RawEntry::new(cells[0], &title, cells[cells.len() - 1]))
    }
}

/// `2.1 Casing ........ 12` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedLeader;

impl TocStrategy for DottedLeader {
    fn name(&self) -> &'static str {
        "dotted_leader"
    }

    fn match_line(&self, line: &str) -> Option<RawEntry> {
        regex_fields(&DOTTED_LEADER, line)
    }
}

/// `2.1 Casing      12` with three or more spaces before the page
#[derive(Debug, Clone, Copy, Default)]
pub struct WideSpacing;

impl TocStrategy for WideSpacing {
    fn name(&self) -> &'static str {
        "wide_spacing"
    }

    fn match_line(&self, line: &str) -> Option<RawEntry> {
        regex_fields(&WIDE_SPACING, line)
    }
}

/// `2.1<TAB>Casing<TAB>12` triples
#[derive(Debug, Clone, Copy, Default)]
pub struct TabDelimited;

impl TocStrategy for TabDelimited {
    fn name(&self) -> &'static str {
        "tab_delimited"
    }

    fn match_line(&self, line: &str) -> Option<RawEntry> {
        if !line.contains('\t') {
            return None;
        }
        let fields: Vec<&str> = line.split('\t').map(str::trim).filter(|f| !f.is_empty()).collect();
        match fields.as_slice() {
            [number, title, page] => Some(RawEntry::new(number, title, page)),
            _ => None,
        }
    }
}

/// `2.1 Casing  12` with two spaces, as left behind by OCR
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseSpacing;

impl TocStrategy for LooseSpacing {
    fn name(&self) -> &'static str {
        "loose_spacing"
    }

    fn match_line(&self, line: &str) -> Option<RawEntry> {
        regex_fields(&LOOSE_SPACING, line)
    }
}

/// Result of running the cascade over a region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Entries in source order (empty when no strategy succeeded)
    pub entries: Vec<TocEntry>,
    /// Name of the winning strategy
    pub strategy: Option<&'static str>,
}

/// Ordered list of strategies with a minimum-entries threshold
pub struct PatternCascade {
    strategies: Vec<Box<dyn TocStrategy>>,
    min_entries: usize,
    max_page: u32,
}

impl PatternCascade {
    /// Create the standard five-strategy cascade
    pub fn new(min_entries: usize, max_page: u32) -> Self {
        Self::with_strategies(
            vec![
                Box::new(DelimitedTable),
                Box::new(DottedLeader),
                Box::new(WideSpacing),
                Box::new(TabDelimited),
                Box::new(LooseSpacing),
            ],
            min_entries,
            max_page,
        )
    }

    /// Create a cascade over a custom strategy list (tried in the given order)
    pub fn with_strategies(strategies: Vec<Box<dyn TocStrategy>>, min_entries: usize, max_page: u32) -> Self {
        Self {
            strategies,
            min_entries: min_entries.max(1),
            max_page,
        }
    }

    /// Strategy names in cascade order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the cascade; the first strategy reaching the threshold wins
    pub fn extract(&self, lines: &[&str]) -> CascadeOutcome {
        for strategy in &self.strategies {
            let entries = strategy.attempt(lines, self.max_page);
            debug!("Strategy {} matched {} entries", strategy.name(), entries.len());
            if entries.len() >= self.min_entries {
                return CascadeOutcome {
                    entries,
                    strategy: Some(strategy.name()),
                };
            }
        }
        CascadeOutcome::default()
    }
}

impl Default for PatternCascade {
    fn default() -> Self {
        Self::new(3, 2000)
    }
}
