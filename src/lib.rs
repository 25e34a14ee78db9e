//! # Research Dashboard
//!
//! Browse a catalog of research papers from the terminal: free-text search,
//! faceted filtering by topic, country, institution and year, and paginated
//! listings.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, FilterOption, ListingState, etc.)
//! - [`listing`]: Predicate, filter engine, paginator and the listing reducer
//! - [`catalog`]: Loading papers and facet options from JSON
//! - [`ui`]: Colored terminal rendering
//! - [`utils`]: Validation, suggestions and layout helpers
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod listing;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use listing::{ListingSession, ListingView};
pub use models::{ListingEvent, ListingState, Paper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
