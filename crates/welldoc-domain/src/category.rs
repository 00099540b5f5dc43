//! Category module - the closed taxonomy of report sections

use serde::{Deserialize, Serialize};
use std::fmt;

/// Section category of an end-of-well / end-of-job report
///
/// The set is closed. Which titles map to which category is data (see the
/// extractor's taxonomy table), not part of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Project administration, distribution lists, approvals
    ProjectAdmin,
    /// Well name, location, coordinates, licence data
    WellIdentification,
    /// Lithology, stratigraphy, formation tops
    Geology,
    /// Hole sections, bit runs, borehole data
    Borehole,
    /// Casing and liner program, cementing
    Casing,
    /// Directional surveys and trajectory
    Directional,
    /// Daily drilling operations, time breakdown, mud
    DrillingOperations,
    /// Completion design and installation
    Completion,
    /// Technical summary and conclusions
    TechnicalSummary,
    /// Health, safety and environment
    Hse,
    /// Appendices and enclosures
    Appendices,
    /// Well tests, production tests
    WellTesting,
    /// Workovers and interventions
    Intervention,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 13] = [
        Category::ProjectAdmin,
        Category::WellIdentification,
        Category::Geology,
        Category::Borehole,
        Category::Casing,
        Category::Directional,
        Category::DrillingOperations,
        Category::Completion,
        Category::TechnicalSummary,
        Category::Hse,
        Category::Appendices,
        Category::WellTesting,
        Category::Intervention,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ProjectAdmin => "project_admin",
            Category::WellIdentification => "well_identification",
            Category::Geology => "geology",
            Category::Borehole => "borehole",
            Category::Casing => "casing",
            Category::Directional => "directional",
            Category::DrillingOperations => "drilling_operations",
            Category::Completion => "completion",
            Category::TechnicalSummary => "technical_summary",
            Category::Hse => "hse",
            Category::Appendices => "appendices",
            Category::WellTesting => "well_testing",
            Category::Intervention => "intervention",
        }
    }

    /// Parse a category from its snake_case name
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == wanted)
    }

    /// Human-readable words for the category (`well_testing` → `well testing`)
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
