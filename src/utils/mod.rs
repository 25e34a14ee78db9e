//! Utility modules supporting the dashboard.
//!
//! - [`validate_paper`]: field checks run when a catalog is loaded
//! - [`suggest_option`]: closest facet option for a mistyped filter value
//! - [`truncate_with_ellipsis`], [`render_page_bar`] and friends: plain-text
//!   layout helpers used by the terminal renderer
//!
//! # Suggestions
//!
//! ```rust
//! use research_dashboard::catalog::Catalog;
//! use research_dashboard::models::FacetCategory;
//! use research_dashboard::utils::suggest_option;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::sample()?;
//! let option = suggest_option(catalog.facets(), FacetCategory::Institutions, "OpenIA");
//! assert_eq!(option.map(|o| o.id.as_str()), Some("openai"));
//! # Ok(())
//! # }
//! ```

pub mod display;
mod suggest;
mod validate;

pub use display::{
    display_width, format_links, format_long_date, format_results_summary, format_short_date,
    format_topics, get_listing_table_columns, is_terminal, render_page_bar, terminal_width,
    truncate_at_word, truncate_with_ellipsis,
};
pub use suggest::suggest_option;
pub use validate::{validate_date, validate_paper, validate_paper_id, validate_url, ValidationError};
