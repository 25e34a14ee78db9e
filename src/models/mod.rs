//! Core data models for papers, facets and listing state.

mod filter;
mod paper;
mod query;

pub use filter::{ChipColor, FacetCategory, FacetOptions, FilterOption, Filters, ParseFacetError};
pub use paper::{Paper, PaperBuilder};
pub use query::{ListingEvent, ListingState, ViewMode};
