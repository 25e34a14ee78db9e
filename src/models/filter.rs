//! Facet options and filter selections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Display color of a filter chip (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Coral,
    Teal,
    Amber,
    Violet,
    Emerald,
    Blue,
    Rose,
}

impl ChipColor {
    /// Palette order used when colors are assigned automatically
    pub const PALETTE: [ChipColor; 7] = [
        ChipColor::Coral,
        ChipColor::Teal,
        ChipColor::Amber,
        ChipColor::Violet,
        ChipColor::Emerald,
        ChipColor::Blue,
        ChipColor::Rose,
    ];

    /// Color for the n-th automatically colored option
    pub fn cycle(n: usize) -> Self {
        Self::PALETTE[n % Self::PALETTE.len()]
    }
}

/// One of the four independent filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetCategory {
    Topics,
    Countries,
    Institutions,
    Years,
}

impl FacetCategory {
    /// All categories in sidebar order
    pub const ALL: [FacetCategory; 4] = [
        FacetCategory::Topics,
        FacetCategory::Countries,
        FacetCategory::Institutions,
        FacetCategory::Years,
    ];

    /// Returns the identifier used in config, JSON and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            FacetCategory::Topics => "topics",
            FacetCategory::Countries => "countries",
            FacetCategory::Institutions => "institutions",
            FacetCategory::Years => "years",
        }
    }

    /// Returns the sidebar heading
    pub fn name(&self) -> &'static str {
        match self {
            FacetCategory::Topics => "Topics",
            FacetCategory::Countries => "Country",
            FacetCategory::Institutions => "Institution",
            FacetCategory::Years => "Year",
        }
    }
}

impl std::fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Error returned when parsing an unknown facet category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown facet category '{0}' (expected topics, countries, institutions or years)")]
pub struct ParseFacetError(pub String);

impl FromStr for FacetCategory {
    type Err = ParseFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "topics" | "topic" => Ok(FacetCategory::Topics),
            "countries" | "country" => Ok(FacetCategory::Countries),
            "institutions" | "institution" => Ok(FacetCategory::Institutions),
            "years" | "year" => Ok(FacetCategory::Years),
            _ => Err(ParseFacetError(s.to_string())),
        }
    }
}

/// A selectable option inside one facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Identifier, unique within its facet
    pub id: String,

    /// Human-readable label, compared against paper fields
    pub label: String,

    /// Number of papers shown next to the chip (not recomputed on filtering)
    #[serde(default)]
    pub count: usize,

    /// Chip color
    pub color: ChipColor,
}

impl FilterOption {
    /// Create a new filter option
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        count: usize,
        color: ChipColor,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            count,
            color,
        }
    }
}

/// The option lists of all four facets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    #[serde(default)]
    pub topics: Vec<FilterOption>,

    #[serde(default)]
    pub countries: Vec<FilterOption>,

    #[serde(default)]
    pub institutions: Vec<FilterOption>,

    #[serde(default)]
    pub years: Vec<FilterOption>,
}

impl FacetOptions {
    /// Options of one facet, in display order
    pub fn options(&self, category: FacetCategory) -> &[FilterOption] {
        match category {
            FacetCategory::Topics => &self.topics,
            FacetCategory::Countries => &self.countries,
            FacetCategory::Institutions => &self.institutions,
            FacetCategory::Years => &self.years,
        }
    }

    /// Find an option by its exact id
    pub fn find(&self, category: FacetCategory, id: &str) -> Option<&FilterOption> {
        self.options(category).iter().find(|o| o.id == id)
    }

    /// Resolve a selected id to the label it filters on
    pub fn resolve_label(&self, category: FacetCategory, id: &str) -> Option<&str> {
        self.find(category, id).map(|o| o.label.as_str())
    }

    /// Find an option by id or label, ignoring case
    ///
    /// Exact id matches win over case-insensitive ones.
    pub fn lookup(&self, category: FacetCategory, input: &str) -> Option<&FilterOption> {
        if let Some(option) = self.find(category, input) {
            return Some(option);
        }

        let needle = input.trim().to_lowercase();
        self.options(category)
            .iter()
            .find(|o| o.id.to_lowercase() == needle || o.label.to_lowercase() == needle)
    }

    /// Total number of options across all facets
    pub fn len(&self) -> usize {
        FacetCategory::ALL
            .iter()
            .map(|c| self.options(*c).len())
            .sum()
    }

    /// Check if no facet has any option
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selected option ids, one set per facet
///
/// Ids that do not correspond to an option are kept but never match a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub topics: BTreeSet<String>,

    #[serde(default)]
    pub countries: BTreeSet<String>,

    #[serde(default)]
    pub institutions: BTreeSet<String>,

    #[serde(default)]
    pub years: BTreeSet<String>,
}

impl Filters {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style selection of an id
    pub fn with(mut self, category: FacetCategory, id: impl Into<String>) -> Self {
        self.select(category, id);
        self
    }

    /// Selected ids of one facet
    pub fn selected(&self, category: FacetCategory) -> &BTreeSet<String> {
        match category {
            FacetCategory::Topics => &self.topics,
            FacetCategory::Countries => &self.countries,
            FacetCategory::Institutions => &self.institutions,
            FacetCategory::Years => &self.years,
        }
    }

    fn selected_mut(&mut self, category: FacetCategory) -> &mut BTreeSet<String> {
        match category {
            FacetCategory::Topics => &mut self.topics,
            FacetCategory::Countries => &mut self.countries,
            FacetCategory::Institutions => &mut self.institutions,
            FacetCategory::Years => &mut self.years,
        }
    }

    /// Check whether an id is selected
    pub fn is_selected(&self, category: FacetCategory, id: &str) -> bool {
        self.selected(category).contains(id)
    }

    /// Select an id; returns false if it was already selected
    pub fn select(&mut self, category: FacetCategory, id: impl Into<String>) -> bool {
        self.selected_mut(category).insert(id.into())
    }

    /// Deselect an id; returns false if it was not selected
    pub fn deselect(&mut self, category: FacetCategory, id: &str) -> bool {
        self.selected_mut(category).remove(id)
    }

    /// Select the id if absent, deselect it if present
    ///
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, category: FacetCategory, id: &str) -> bool {
        if self.deselect(category, id) {
            false
        } else {
            self.select(category, id)
        }
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        for category in FacetCategory::ALL {
            self.selected_mut(category).clear();
        }
    }

    /// Number of selected ids across all facets
    pub fn active_count(&self) -> usize {
        FacetCategory::ALL
            .iter()
            .map(|c| self.selected(*c).len())
            .sum()
    }

    /// Whether any facet has a selection
    pub fn has_active_filters(&self) -> bool {
        self.active_count() > 0
    }
}
