//! Derive facet options from the papers themselves.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{ChipColor, FacetCategory, FacetOptions, FilterOption, Paper};

/// Build one option per distinct topic, country, institution and year
///
/// Counts reflect the given papers at derivation time. Topic, country and
/// institution options are ordered by count (descending) then label; years
/// are ordered newest first and use the year itself as id and label.
pub fn derive_facets(papers: &[Paper]) -> FacetOptions {
    let mut topics: BTreeMap<&str, usize> = BTreeMap::new();
    let mut countries: BTreeMap<&str, usize> = BTreeMap::new();
    let mut institutions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut years: BTreeMap<&str, usize> = BTreeMap::new();

    for paper in papers {
        let distinct: BTreeSet<&str> = paper
            .topics
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        for topic in distinct {
            *topics.entry(topic).or_default() += 1;
        }

        if !paper.country.is_empty() {
            *countries.entry(paper.country.as_str()).or_default() += 1;
        }
        if !paper.institution.is_empty() {
            *institutions.entry(paper.institution.as_str()).or_default() += 1;
        }
        if let Some(year) = paper.year() {
            *years.entry(year).or_default() += 1;
        }
    }

    let options = FacetOptions {
        topics: labelled_options(topics),
        countries: labelled_options(countries),
        institutions: labelled_options(institutions),
        years: years
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, (year, count))| FilterOption::new(year, year, count, ChipColor::cycle(i)))
            .collect(),
    };

    for category in FacetCategory::ALL {
        tracing::debug!(
            facet = category.id(),
            options = options.options(category).len(),
            "Derived facet options"
        );
    }

    options
}

fn labelled_options(counts: BTreeMap<&str, usize>) -> Vec<FilterOption> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable sort: equal counts stay in label order
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let mut used: HashSet<String> = HashSet::new();
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let id = unique_slug(label, &mut used);
            FilterOption::new(id, label, count, ChipColor::cycle(i))
        })
        .collect()
}

/// Lowercase slug: alphanumerics kept, runs of anything else become '-'
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("option");
    }
    slug
}

fn unique_slug(label: &str, used: &mut HashSet<String>) -> String {
    let base = slugify(label);
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperBuilder;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Machine Learning"), "machine-learning");
        assert_eq!(slugify("  UC Berkeley! "), "uc-berkeley");
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("???"), "option");
    }

    #[test]
    fn test_colliding_slugs_get_suffixes() {
        let mut counts = BTreeMap::new();
        counts.insert("C++", 2);
        counts.insert("C", 1);

        let options = labelled_options(counts);
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "c-2"]);
        assert_eq!(options[0].label, "C++");
    }

    #[test]
    fn test_derive_counts_and_order() {
        let papers = vec![
            PaperBuilder::new("1", "A")
                .date("2020-01-01")
                .topic("NLP")
                .topic("NLP")
                .country("USA")
                .institution("OpenAI")
                .build(),
            PaperBuilder::new("2", "B")
                .date("2017-06-01")
                .topic("NLP")
                .topic("Vision")
                .country("UK")
                .institution("DeepMind")
                .build(),
            PaperBuilder::new("3", "C")
                .date("2020-09-09")
                .topic("Vision")
                .topic("Audio")
                .country("USA")
                .build(),
        ];

        let facets = derive_facets(&papers);

        let topics: Vec<(&str, usize)> = facets
            .topics
            .iter()
            .map(|o| (o.label.as_str(), o.count))
            .collect();
        assert_eq!(topics, vec![("NLP", 2), ("Vision", 2), ("Audio", 1)]);

        assert_eq!(facets.countries[0].label, "USA");
        assert_eq!(facets.countries[0].count, 2);
        assert_eq!(facets.institutions.len(), 2);

        let years: Vec<(&str, usize)> = facets
            .years
            .iter()
            .map(|o| (o.id.as_str(), o.count))
            .collect();
        assert_eq!(years, vec![("2020", 2), ("2017", 1)]);
    }

    #[test]
    fn test_derive_from_nothing() {
        assert!(derive_facets(&[]).is_empty());
    }
}
