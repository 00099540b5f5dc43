//! Publication date resolution
//!
//! Dates are searched first near context keywords ("issue date", "datum", ...)
//! and otherwise in the first lines of the text. Dutch month names are
//! translated before matching. When the primary source yields nothing, the
//! secondary source is searched the same way.

use crate::config::{DatePolicy, ExtractorConfig};
use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// Keywords announcing a publication date on the same or following lines
pub const CONTEXT_KEYWORDS: &[&str] = &[
    "publication date",
    "date of issue",
    "issue date",
    "date issued",
    "approved",
    "version",
    "revision date",
    "report date",
    "datum",
    "date:",
];

/// Dutch month names and abbreviations with their English form
const DUTCH_MONTHS: &[(&str, &str)] = &[
    ("januari", "January"),
    ("februari", "February"),
    ("maart", "March"),
    ("mei", "May"),
    ("juni", "June"),
    ("juli", "July"),
    ("augustus", "August"),
    ("oktober", "October"),
    ("mrt", "Mar"),
    ("okt", "Oct"),
];

const MONTH: &str = r"(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b\.?";

/// Separator between the parts of a named-month date ("11 Feb 2011", "11-Feb-2011")
const SEP: &str = r"[\s\-./]+";

static DUTCH_MONTH_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(januari|februari|maart|mei|juni|juli|augustus|oktober|mrt|okt)\b").expect("valid regex")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("valid regex"));

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[-./](\d{1,2})[-./](\d{4})\b").expect("valid regex"));

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?{sep}(?:of\s+)?{month},?{sep}(\d{{4}})\b",
        sep = SEP,
        month = MONTH
    ))
    .expect("valid regex")
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{month}{sep}(\d{{1,2}})(?:st|nd|rd|th)?,?{sep}(\d{{4}})\b",
        sep = SEP,
        month = MONTH
    ))
    .expect("valid regex")
});

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{month},?{sep}(\d{{4}})\b", sep = SEP, month = MONTH)).expect("valid regex")
});

/// Which source a date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Structured conversion text
    Primary,
    /// Raw text extraction
    Secondary,
}

/// Which step of the search found the date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMethod {
    /// Near a context keyword
    Context,
    /// In the leading lines without a keyword
    Standalone,
}

/// A resolved publication date with how it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateResolution {
    /// The chosen date
    pub date: NaiveDate,
    /// Source text the date came from
    pub source: DateSource,
    /// Search step that produced the candidates
    pub method: DateMethod,
    /// All in-range candidates of that step, in text order
    pub candidates: Vec<NaiveDate>,
}

/// Replace Dutch month names with English ones
pub fn normalize_months(text: &str) -> Cow<'_, str> {
    DUTCH_MONTH_WORD.replace_all(text, |caps: &Captures<'_>| {
        let word = caps[1].to_lowercase();
        DUTCH_MONTHS
            .iter()
            .find(|(nl, _)| *nl == word)
            .map(|(_, en)| en.to_string())
            .unwrap_or_else(|| caps[1].to_string())
    })
}

/// Month number for an English month name or abbreviation
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim_end_matches('.').to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

type DateBuilder = fn(&Captures<'_>) -> Option<NaiveDate>;

fn from_iso(c: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_num(&c[1])?, parse_num(&c[2])?, parse_num(&c[3])?)
}

fn from_numeric(c: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_num(&c[3])?, parse_num(&c[2])?, parse_num(&c[1])?)
}

fn from_day_month_year(c: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_num(&c[3])?, month_number(&c[2])?, parse_num(&c[1])?)
}

fn from_month_day_year(c: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_num(&c[3])?, month_number(&c[1])?, parse_num(&c[2])?)
}

fn from_month_year(c: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_num(&c[2])?, month_number(&c[1])?, 1)
}

fn overlaps(claimed: &[Range<usize>], span: &Range<usize>) -> bool {
    claimed.iter().any(|c| c.start < span.end && span.start < c.end)
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}

/// Every date-shaped substring of one (already normalized) line, in text order
///
/// Longer shapes claim their span first, so "February 2011" inside
/// "11 February 2011" is not counted again. Impossible dates are dropped.
pub fn dates_in_line(line: &str) -> Vec<NaiveDate> {
    let shapes: [(&Regex, DateBuilder); 5] = [
        (&*ISO_DATE, from_iso as DateBuilder),
        (&*NUMERIC_DATE, from_numeric as DateBuilder),
        (&*DAY_MONTH_YEAR, from_day_month_year as DateBuilder),
        (&*MONTH_DAY_YEAR, from_month_day_year as DateBuilder),
        (&*MONTH_YEAR, from_month_year as DateBuilder),
    ];

    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut found: Vec<(usize, NaiveDate)> = Vec::new();

    for (re, build) in shapes.iter() {
        for caps in re.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let span = whole.range();
            if overlaps(&claimed, &span) {
                continue;
            }
            // The span is claimed even when the date is impossible
            claimed.push(span.clone());
            if let Some(date) = build(&caps) {
                found.push((span.start, date));
            }
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, d)| d).collect()
}

/// Resolves one canonical publication date per document
#[derive(Debug, Clone)]
pub struct DateResolver {
    min_year: i32,
    max_year: i32,
    policy: DatePolicy,
    context_lines: usize,
    standalone_lines: usize,
}

impl DateResolver {
    /// Create a resolver from the pipeline configuration
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            min_year: config.min_year,
            max_year: config.max_year,
            policy: config.date_policy,
            context_lines: config.date_context_lines,
            standalone_lines: config.standalone_date_lines,
        }
    }

    /// Override the candidate policy
    pub fn with_policy(mut self, policy: DatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve against the primary text, falling back to the secondary text
    ///
    /// The secondary text is only searched when the primary yields nothing.
    pub fn resolve(&self, primary: &str, secondary: Option<&str>) -> Option<DateResolution> {
        self.resolve_source(primary, DateSource::Primary)
            .or_else(|| secondary.and_then(|text| self.resolve_source(text, DateSource::Secondary)))
    }

    /// Run the full search procedure against one source
    pub fn resolve_source(&self, text: &str, source: DateSource) -> Option<DateResolution> {
        let normalized = normalize_months(text);
        let lines: Vec<&str> = normalized.lines().collect();

        let (method, candidates) = {
            let contextual = self.contextual_candidates(&lines);
            if contextual.is_empty() {
                (DateMethod::Standalone, self.standalone_candidates(&lines))
            } else {
                (DateMethod::Context, contextual)
            }
        };

        let date = match self.policy {
            DatePolicy::Earliest => candidates.iter().min().copied(),
            DatePolicy::Latest => candidates.iter().max().copied(),
        }?;

        debug!("Resolved date {} from {:?} source ({:?}, {} candidates)", date, source, method, candidates.len());

        Some(DateResolution {
            date,
            source,
            method,
            candidates,
        })
    }

    fn in_range(&self, date: &NaiveDate) -> bool {
        (self.min_year..=self.max_year).contains(&date.year())
    }

    fn contextual_candidates(&self, lines: &[&str]) -> Vec<NaiveDate> {
        // Overlapping keyword windows must not count a line twice
        let mut window: BTreeSet<usize> = BTreeSet::new();
        for (idx, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();
            if CONTEXT_KEYWORDS.iter().any(|k| lower.contains(k)) {
                let end = (idx + self.context_lines + 1).min(lines.len());
                window.extend(idx..end);
            }
        }

        window
            .into_iter()
            .flat_map(|idx| dates_in_line(lines[idx]))
            .filter(|d| self.in_range(d))
            .collect()
    }

    fn standalone_candidates(&self, lines: &[&str]) -> Vec<NaiveDate> {
        lines
            .iter()
            .take(self.standalone_lines)
            .flat_map(|line| dates_in_line(line))
            .filter(|d| self.in_range(d))
            .collect()
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_normalization() {
        assert_eq!(normalize_months("11 februari 2011"), "11 February 2011");
        assert_eq!(normalize_months("MEI 2015, okt 2016"), "May 2015, Oct 2016");
        assert_eq!(normalize_months("meister"), "meister");
    }

    #[test]
    fn test_date_shapes() {
        assert_eq!(dates_in_line("Issued 2011-02-11"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("Datum: 11-02-2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("11.02.2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("the 11th of February 2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("February 11, 2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("Sept. 2012"), vec![ymd(2012, 9, 1)]);
    }

    #[test]
    fn test_dashed_named_month_dates() {
        assert_eq!(dates_in_line("Report date: 11-Feb-2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("Date: Feb-2011"), vec![ymd(2011, 2, 1)]);
        assert_eq!(dates_in_line("Feb-11-2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line("11/Feb/2011"), vec![ymd(2011, 2, 11)]);
        assert_eq!(dates_in_line(&normalize_months("11-februari-2011")), vec![ymd(2011, 2, 11)]);
    }

    #[test]
    fn test_dashed_date_resolves() {
        let res = DateResolver::default()
            .resolve("Final Well Report\nDate: 11-Feb-2011\n", None)
            .unwrap();
        assert_eq!(res.date, ymd(2011, 2, 11));

        let res = DateResolver::default().resolve("Datum: 3-mrt-2010", None).unwrap();
        assert_eq!(res.date, ymd(2010, 3, 3));
    }

    #[test]
    fn test_longer_span_claims_first() {
        assert_eq!(dates_in_line("11 February 2011 and March 2012"), vec![ymd(2011, 2, 11), ymd(2012, 3, 1)]);
    }

    #[test]
    fn test_invalid_calendar_dates_dropped() {
        assert!(dates_in_line("31-02-2011").is_empty());
        assert!(dates_in_line("2011-13-01").is_empty());
    }

    #[test]
    fn test_context_keyword_window() {
        let text = "Cover\nIssue date:\n\n11 February 2011\nDrilled in March 2009";
        let res = DateResolver::default().resolve(text, None).unwrap();
        assert_eq!(res.date, ymd(2011, 2, 11));
        assert_eq!(res.method, DateMethod::Context);
        assert_eq!(res.source, DateSource::Primary);
    }

    #[test]
    fn test_earliest_candidate_wins() {
        let text = "Report date: 2018-04-01\nRevision date: 2011-02-01";
        let res = DateResolver::default().resolve(text, None).unwrap();
        assert_eq!(res.date, ymd(2011, 2, 1));
        assert_eq!(res.candidates.len(), 2);
    }

    #[test]
    fn test_latest_policy() {
        let text = "Report date: 2018-04-01\nRevision date: 2011-02-01";
        let res = DateResolver::default().with_policy(DatePolicy::Latest).resolve(text, None).unwrap();
        assert_eq!(res.date, ymd(2018, 4, 1));
    }

    #[test]
    fn test_standalone_scan() {
        let text = "END OF WELL REPORT\nNLW-GT-01\nJune 2014\n";
        let res = DateResolver::default().resolve(text, None).unwrap();
        assert_eq!(res.date, ymd(2014, 6, 1));
        assert_eq!(res.method, DateMethod::Standalone);
    }

    #[test]
    fn test_standalone_scan_is_bounded() {
        let mut text = "line\n".repeat(30);
        text.push_str("June 2014\n");
        assert!(DateResolver::default().resolve(&text, None).is_none());
    }

    #[test]
    fn test_year_range_filter() {
        let text = "Report date: 1900-01-01\nApproved 2150-01-01";
        assert!(DateResolver::default().resolve(text, None).is_none());
    }

    #[test]
    fn test_secondary_source_fallback() {
        let res = DateResolver::default()
            .resolve("no dates here", Some("Datum: 3 maart 2010"))
            .unwrap();
        assert_eq!(res.date, ymd(2010, 3, 3));
        assert_eq!(res.source, DateSource::Secondary);
    }

    #[test]
    fn test_secondary_ignored_when_primary_resolves() {
        let res = DateResolver::default()
            .resolve("Report date: 2012-05-05", Some("Report date: 2001-01-01"))
            .unwrap();
        assert_eq!(res.date, ymd(2012, 5, 5));
        assert_eq!(res.source, DateSource::Primary);
    }

    #[test]
    fn test_no_date_is_none() {
        assert!(DateResolver::default().resolve("", Some("")).is_none());
    }

    const DUTCH: [&str; 12] = [
        "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus", "september", "oktober",
        "november", "december",
    ];
    const ENGLISH: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
        "November", "December",
    ];

    proptest! {
        #[test]
        fn prop_locale_month_invariance(month in 0usize..12, day in 1u32..=28, year in 1950i32..=2100) {
            let resolver = DateResolver::default();
            let nl = format!("Datum: {} {} {}", day, DUTCH[month], year);
            let en = format!("Datum: {} {} {}", day, ENGLISH[month], year);
            let a = resolver.resolve(&nl, None).map(|r| r.date);
            let b = resolver.resolve(&en, None).map(|r| r.date);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a, NaiveDate::from_ymd_opt(year, month as u32 + 1, day));
        }
    }
}
