//! Paper listing engine: search, facet filtering and pagination.
//!
//! The listing is evaluated in three stages, each a pure function of its
//! inputs:
//!
//! - [`PaperPredicate`]: combines the search text and facet selections into
//!   a single `matches(&Paper) -> bool`
//! - [`filter_papers`]: applies the predicate to the collection, keeping the
//!   original order
//! - [`paginate`]: cuts the filtered list into fixed-size pages, with
//!   [`page_window`] deciding which page buttons to show
//!
//! [`ListingSession`] ties the stages to a [`Catalog`](crate::catalog::Catalog)
//! and a [`ListingState`](crate::models::ListingState) driven by
//! [`ListingEvent`](crate::models::ListingEvent)s.
//!
//! ```rust
//! use research_dashboard::catalog::Catalog;
//! use research_dashboard::listing::ListingSession;
//! use research_dashboard::models::ListingEvent;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::sample()?;
//! let mut session = ListingSession::new(&catalog);
//! session.dispatch(ListingEvent::SetSearch { query: "attention".into() });
//!
//! let view = session.view();
//! assert!(view.papers.len() <= 6);
//! # Ok(())
//! # }
//! ```

mod engine;
mod paginate;
mod predicate;
mod state;

pub use engine::{filter_papers, search};
pub use paginate::{
    page_window, paginate, total_pages, PageSlice, PageWindow, DEFAULT_PAGE_SIZE,
    PAGE_WINDOW_SIZE,
};
pub use predicate::PaperPredicate;
pub use state::{compute_view, reduce, ListingSession, ListingView};
