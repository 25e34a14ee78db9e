//! Combined search and facet predicate over a single paper.

use crate::models::{FacetCategory, FacetOptions, Filters, Paper};

/// Values a facet is restricted to
///
/// `None` means the facet has no selection and accepts every paper. A
/// restriction whose values are all unresolvable accepts nothing.
type Restriction<'a> = Option<Vec<&'a str>>;

/// Decides whether a paper satisfies a search query and a filter selection
///
/// All facets are ANDed together; options within one facet are ORed. Topic,
/// country and institution ids are resolved to option labels before being
/// compared with paper fields, while year ids are used verbatim as a prefix
/// of the paper date.
#[derive(Debug, Clone)]
pub struct PaperPredicate<'a> {
    needle: Option<String>,
    topics: Restriction<'a>,
    countries: Restriction<'a>,
    institutions: Restriction<'a>,
    years: Restriction<'a>,
}

impl<'a> PaperPredicate<'a> {
    /// Build the predicate for a query, a selection and the facet options
    pub fn new(search_query: &str, filters: &'a Filters, options: &'a FacetOptions) -> Self {
        let needle = if search_query.is_empty() {
            None
        } else {
            Some(search_query.to_lowercase())
        };

        Self {
            needle,
            topics: resolve_labels(FacetCategory::Topics, filters, options),
            countries: resolve_labels(FacetCategory::Countries, filters, options),
            institutions: resolve_labels(FacetCategory::Institutions, filters, options),
            years: year_prefixes(filters),
        }
    }

    /// A predicate that accepts every paper
    pub fn accept_all() -> Self {
        Self {
            needle: None,
            topics: None,
            countries: None,
            institutions: None,
            years: None,
        }
    }

    /// Whether the paper passes the search and every facet
    pub fn matches(&self, paper: &Paper) -> bool {
        self.matches_search(paper)
            && self.matches_facet(FacetCategory::Topics, paper)
            && self.matches_facet(FacetCategory::Countries, paper)
            && self.matches_facet(FacetCategory::Institutions, paper)
            && self.matches_facet(FacetCategory::Years, paper)
    }

    /// Case-insensitive substring match against title or abstract
    pub fn matches_search(&self, paper: &Paper) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                paper.title.to_lowercase().contains(needle.as_str())
                    || paper.r#abstract.to_lowercase().contains(needle.as_str())
            }
        }
    }

    /// Whether the paper passes a single facet
    pub fn matches_facet(&self, category: FacetCategory, paper: &Paper) -> bool {
        let Some(allowed) = self.restriction(category) else {
            return true;
        };

        match category {
            FacetCategory::Topics => allowed.iter().any(|label| paper.has_topic(label)),
            FacetCategory::Countries => allowed.iter().any(|label| paper.country == *label),
            FacetCategory::Institutions => {
                allowed.iter().any(|label| paper.institution == *label)
            }
            FacetCategory::Years => allowed.iter().any(|prefix| paper.date.starts_with(prefix)),
        }
    }

    /// Whether the predicate constrains anything at all
    pub fn is_unrestricted(&self) -> bool {
        self.needle.is_none() && FacetCategory::ALL.iter().all(|c| self.restriction(*c).is_none())
    }

    fn restriction(&self, category: FacetCategory) -> Option<&[&'a str]> {
        match category {
            FacetCategory::Topics => self.topics.as_deref(),
            FacetCategory::Countries => self.countries.as_deref(),
            FacetCategory::Institutions => self.institutions.as_deref(),
            FacetCategory::Years => self.years.as_deref(),
        }
    }
}

/// Resolve selected ids to option labels, dropping ids without an option
fn resolve_labels<'a>(
    category: FacetCategory,
    filters: &'a Filters,
    options: &'a FacetOptions,
) -> Restriction<'a> {
    let selected = filters.selected(category);
    if selected.is_empty() {
        return None;
    }

    Some(
        selected
            .iter()
            .filter_map(|id| options.resolve_label(category, id))
            .collect(),
    )
}

/// Year ids are matched as literal date prefixes, never resolved to labels
fn year_prefixes(filters: &Filters) -> Restriction<'_> {
    let selected = filters.selected(FacetCategory::Years);
    if selected.is_empty() {
        return None;
    }

    Some(selected.iter().map(String::as_str).collect())
}
