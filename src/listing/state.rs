//! Listing reducer, session and the computed view handed to renderers.

use serde::Serialize;
use std::num::NonZeroUsize;

use crate::catalog::Catalog;
use crate::models::{ListingEvent, ListingState, Paper};

use super::engine::search;
use super::paginate::{paginate, PageWindow, DEFAULT_PAGE_SIZE};

/// Apply one event to a listing state
///
/// Any change to the search text or the filters moves back to page 1;
/// page navigation never touches the query. `PreviousPage` stops at page 1,
/// while `NextPage` is unbounded here because the state alone does not know
/// how many pages exist (see [`ListingSession::dispatch`]).
pub fn reduce(mut state: ListingState, event: ListingEvent) -> ListingState {
    let resets_page = event.changes_query();

    match event {
        ListingEvent::SetSearch { query } => state.search_query = query,
        ListingEvent::ToggleFilter { category, id } => {
            state.filters.toggle(category, &id);
        }
        ListingEvent::SelectFilter { category, id } => {
            state.filters.select(category, id);
        }
        ListingEvent::DeselectFilter { category, id } => {
            state.filters.deselect(category, &id);
        }
        ListingEvent::SetFilters { filters } => state.filters = filters,
        ListingEvent::ClearFilters => state.filters.clear(),
        ListingEvent::SetPage { page } => state.page = page,
        ListingEvent::NextPage => state.page = state.page.saturating_add(1),
        ListingEvent::PreviousPage => state.page = state.page.saturating_sub(1).max(1),
        ListingEvent::Reset => state = ListingState::default(),
    }

    if resets_page {
        state.page = 1;
    }

    state
}

/// Everything a renderer needs for one listing screen
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<'c> {
    /// Papers on the current page
    pub papers: Vec<&'c Paper>,

    /// Number of papers matching the query and filters
    pub total_results: usize,

    /// Number of pages for the matching papers
    pub total_pages: usize,

    /// Current page
    pub page: i64,

    /// Page size used
    pub page_size: usize,

    /// Whether the current page lies in `[1, total_pages]`
    pub is_valid_page: bool,

    /// Whether a previous page exists
    pub has_previous: bool,

    /// Whether a following page exists
    pub has_next: bool,

    /// Page buttons to render
    pub window: PageWindow,

    /// Whether any facet option is selected
    pub has_active_filters: bool,

    /// Whether the pagination control should be rendered at all
    pub show_pagination: bool,
}

impl ListingView<'_> {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }
}

/// Evaluate a listing state against a catalog
pub fn compute_view<'c>(
    catalog: &'c Catalog,
    state: &ListingState,
    page_size: NonZeroUsize,
) -> ListingView<'c> {
    let filtered = search(
        catalog.papers(),
        &state.search_query,
        &state.filters,
        catalog.facets(),
    );
    let slice = paginate(&filtered, state.page, page_size);

    ListingView {
        papers: slice.items.to_vec(),
        total_results: slice.total_items,
        total_pages: slice.total_pages,
        page: slice.page,
        page_size: slice.page_size,
        is_valid_page: slice.is_valid(),
        has_previous: slice.has_previous(),
        has_next: slice.has_next(),
        window: slice.window(),
        has_active_filters: state.filters.has_active_filters(),
        show_pagination: slice.total_pages > 1,
    }
}

/// A listing screen bound to a catalog
#[derive(Debug, Clone)]
pub struct ListingSession<'c> {
    catalog: &'c Catalog,
    page_size: NonZeroUsize,
    state: ListingState,
}

impl<'c> ListingSession<'c> {
    /// Start a fresh session with the default page size
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_page_size(catalog, DEFAULT_PAGE_SIZE)
    }

    /// Start a fresh session with a custom page size
    pub fn with_page_size(catalog: &'c Catalog, page_size: NonZeroUsize) -> Self {
        Self {
            catalog,
            page_size,
            state: ListingState::default(),
        }
    }

    /// Resume from a saved state
    pub fn from_state(mut self, state: ListingState) -> Self {
        self.state = state;
        self
    }

    /// Current state
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Page size in use
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Apply an event
    ///
    /// Unlike [`reduce`], `NextPage` does not move past the last page.
    pub fn dispatch(&mut self, event: ListingEvent) {
        let clamp_to_last = matches!(event, ListingEvent::NextPage);
        let before = self.state.page;

        tracing::trace!(?event, "Dispatching listing event");
        self.state = reduce(std::mem::take(&mut self.state), event);

        if clamp_to_last {
            let total = self.view().total_pages as i64;
            if self.state.page > total {
                self.state.page = before.min(total).max(1);
            }
        }
    }

    /// Apply a sequence of events in order
    pub fn dispatch_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = ListingEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Compute the current view
    pub fn view(&self) -> ListingView<'c> {
        compute_view(self.catalog, &self.state, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacetCategory, Filters, PaperBuilder};

    fn catalog(count: usize) -> Catalog {
        let papers = (0..count)
            .map(|i| {
                PaperBuilder::new(i.to_string(), format!("Paper {i}"))
                    .date(if i % 2 == 0 { "2020-03-01" } else { "2021-07-15" })
                    .country("USA")
                    .pdf_url(format!("https://example.org/{i}.pdf"))
                    .build()
            })
            .collect();
        Catalog::with_derived_facets(papers).unwrap()
    }

    #[test]
    fn test_search_change_resets_page() {
        let state = ListingState::default().page(4);
        let next = reduce(
            state,
            ListingEvent::SetSearch {
                query: "gan".to_string(),
            },
        );
        assert_eq!(next.page, 1);
        assert_eq!(next.search_query, "gan");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let events = [
            ListingEvent::ToggleFilter {
                category: FacetCategory::Years,
                id: "2020".to_string(),
            },
            ListingEvent::ClearFilters,
            ListingEvent::SetFilters {
                filters: Filters::new().with(FacetCategory::Countries, "usa"),
            },
        ];

        for event in events {
            let next = reduce(ListingState::default().page(3), event);
            assert_eq!(next.page, 1);
        }
    }

    #[test]
    fn test_page_change_keeps_query() {
        let filters = Filters::new().with(FacetCategory::Topics, "ml");
        let state = ListingState::new("vision").filters(filters.clone());

        let next = reduce(state, ListingEvent::SetPage { page: 7 });
        assert_eq!(next.page, 7);
        assert_eq!(next.search_query, "vision");
        assert_eq!(next.filters, filters);
    }

    #[test]
    fn test_previous_page_floors_at_one() {
        let state = reduce(ListingState::default(), ListingEvent::PreviousPage);
        assert_eq!(state.page, 1);

        let state = reduce(ListingState::default().page(-5), ListingEvent::PreviousPage);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_reset() {
        let state = ListingState::new("x").page(9);
        assert_eq!(reduce(state, ListingEvent::Reset), ListingState::default());
    }

    #[test]
    fn test_session_view_and_navigation() {
        let catalog = catalog(13);
        let mut session = ListingSession::new(&catalog);

        let view = session.view();
        assert_eq!(view.total_results, 13);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.papers.len(), 6);
        assert!(view.show_pagination);
        assert!(!view.has_active_filters);

        session.dispatch_all([ListingEvent::NextPage, ListingEvent::NextPage]);
        assert_eq!(session.state().page, 3);
        assert_eq!(session.view().papers.len(), 1);

        session.dispatch(ListingEvent::NextPage);
        assert_eq!(session.state().page, 3);
    }

    #[test]
    fn test_session_next_page_without_results() {
        let catalog = catalog(2);
        let mut session = ListingSession::new(&catalog);
        session.dispatch(ListingEvent::SetSearch {
            query: "nothing like this".to_string(),
        });
        session.dispatch(ListingEvent::NextPage);

        let view = session.view();
        assert_eq!(session.state().page, 1);
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 0);
        assert!(!view.show_pagination);
    }

    #[test]
    fn test_session_year_filter_single_page() {
        let catalog = catalog(3);
        let mut session = ListingSession::new(&catalog);
        session.dispatch(ListingEvent::SelectFilter {
            category: FacetCategory::Years,
            id: "2021".to_string(),
        });

        let view = session.view();
        assert_eq!(view.total_results, 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.has_active_filters);
        assert!(!view.show_pagination);

        session.dispatch(ListingEvent::SetPage { page: 2 });
        let view = session.view();
        assert!(view.papers.is_empty());
        assert!(!view.is_valid_page);
    }
}
