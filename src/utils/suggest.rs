//! "Did you mean" suggestions for mistyped facet values.

use strsim::jaro_winkler;

use crate::models::{FacetCategory, FacetOptions, FilterOption};

/// Minimum similarity for a suggestion to be offered
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Find the option whose id or label is closest to `input`
///
/// Returns `None` when nothing is similar enough to be worth suggesting.
pub fn suggest_option<'a>(
    options: &'a FacetOptions,
    category: FacetCategory,
    input: &str,
) -> Option<&'a FilterOption> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    options
        .options(category)
        .iter()
        .map(|option| {
            let score = jaro_winkler(&needle, &option.id.to_lowercase())
                .max(jaro_winkler(&needle, &option.label.to_lowercase()));
            (option, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(option, _)| option)
}
