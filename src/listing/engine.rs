//! Stable filtering of the paper collection.

use crate::models::{FacetOptions, Filters, Paper};

use super::predicate::PaperPredicate;

/// Keep the papers accepted by the predicate, in their original order
///
/// The source slice is never modified; the result borrows from it.
pub fn filter_papers<'p>(papers: &'p [Paper], predicate: &PaperPredicate<'_>) -> Vec<&'p Paper> {
    let filtered: Vec<&Paper> = papers.iter().filter(|p| predicate.matches(p)).collect();

    tracing::debug!(
        total = papers.len(),
        matched = filtered.len(),
        "Filtered paper collection"
    );

    filtered
}

/// Build the predicate for a query and selection, then filter the collection
pub fn search<'p>(
    papers: &'p [Paper],
    search_query: &str,
    filters: &Filters,
    options: &FacetOptions,
) -> Vec<&'p Paper> {
    let predicate = PaperPredicate::new(search_query, filters, options);
    filter_papers(papers, &predicate)
}
