//! Listing state and the events that change it.

use serde::{Deserialize, Serialize};

use super::filter::{FacetCategory, Filters};

/// Everything the listing screen remembers between renders
///
/// Defaults to an empty search, no filters and page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingState {
    /// Free-text search over titles and abstracts
    #[serde(default)]
    pub search_query: String,

    /// Facet selections
    #[serde(default)]
    pub filters: Filters,

    /// Current page (1-indexed, may be out of range)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            filters: Filters::default(),
            page: default_page(),
        }
    }
}

impl ListingState {
    /// Create a state with a search query
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..Default::default()
        }
    }

    /// Set the filters
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Set the page
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }
}

/// How a page of papers is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Cards
    #[default]
    Grid,
    /// One table row per paper
    Detailed,
}

/// A user interaction on the listing screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListingEvent {
    /// Replace the search text
    SetSearch { query: String },

    /// Flip one option of a facet
    ToggleFilter { category: FacetCategory, id: String },

    /// Select one option of a facet
    SelectFilter { category: FacetCategory, id: String },

    /// Deselect one option of a facet
    DeselectFilter { category: FacetCategory, id: String },

    /// Replace every facet selection at once
    SetFilters { filters: Filters },

    /// Deselect all options of all facets
    ClearFilters,

    /// Jump to a page
    SetPage { page: i64 },

    /// Go forward one page
    NextPage,

    /// Go back one page
    PreviousPage,

    /// Back to the fresh-screen state
    Reset,
}

impl ListingEvent {
    /// Whether the event changes what is matched (as opposed to which page is shown)
    pub fn changes_query(&self) -> bool {
        matches!(
            self,
            ListingEvent::SetSearch { .. }
                | ListingEvent::ToggleFilter { .. }
                | ListingEvent::SelectFilter { .. }
                | ListingEvent::DeselectFilter { .. }
                | ListingEvent::SetFilters { .. }
                | ListingEvent::ClearFilters
        )
    }
}
