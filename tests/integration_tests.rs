//! Integration tests for Research Dashboard
//!
//! These tests drive the listing engine end to end against the bundled
//! sample catalog and against catalogs written to temporary files.

use research_dashboard::catalog::{Catalog, CatalogError};
use research_dashboard::config::{load_config, write_config, Config};
use research_dashboard::listing::{compute_view, search, ListingSession};
use research_dashboard::models::{FacetCategory, Filters, ListingEvent, ListingState};
use std::io::Write;
use std::num::NonZeroUsize;
use tempfile::{tempdir, NamedTempFile};

fn ids(papers: &[&research_dashboard::Paper]) -> Vec<String> {
    papers.iter().map(|p| p.id.clone()).collect()
}

fn write_catalog(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = Catalog::sample().unwrap();
    assert_eq!(catalog.len(), 14);
    assert_eq!(catalog.facets().topics.len(), 8);
    assert_eq!(catalog.facets().years.len(), 7);
    assert!(catalog.get("1").is_some());
}

#[test]
fn test_sample_counts_match_derived_counts() {
    let catalog = Catalog::sample().unwrap();
    let derived = research_dashboard::catalog::derive_facets(catalog.papers());

    for category in FacetCategory::ALL {
        for option in catalog.facets().options(category) {
            if option.count == 0 {
                continue;
            }
            let counted = derived
                .options(category)
                .iter()
                .find(|o| o.label == option.label)
                .map(|o| o.count);
            assert_eq!(
                counted,
                Some(option.count),
                "{} option '{}'",
                category,
                option.label
            );
        }
    }
}

#[test]
fn test_unfiltered_listing_first_page() {
    let catalog = Catalog::sample().unwrap();
    let session = ListingSession::new(&catalog);
    let view = session.view();

    assert_eq!(view.total_results, 14);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.papers.len(), 6);
    assert_eq!(ids(&view.papers), vec!["1", "2", "3", "4", "5", "6"]);
    assert!(view.show_pagination);
    assert!(!view.has_active_filters);
}

#[test]
fn test_search_is_case_insensitive_over_title_and_abstract() {
    let catalog = Catalog::sample().unwrap();
    let found = search(
        catalog.papers(),
        "TRANSFORMER",
        &Filters::new(),
        catalog.facets(),
    );
    assert_eq!(ids(&found), vec!["1", "4", "7"]);

    let found = search(
        catalog.papers(),
        "attention",
        &Filters::new(),
        catalog.facets(),
    );
    assert_eq!(ids(&found), vec!["1"]);
}

#[test]
fn test_filters_and_across_facets_or_within() {
    let catalog = Catalog::sample().unwrap();

    let filters = Filters::new()
        .with(FacetCategory::Topics, "nlp")
        .with(FacetCategory::Countries, "usa");
    let found = search(catalog.papers(), "", &filters, catalog.facets());
    assert_eq!(ids(&found), vec!["1", "2", "4", "9"]);

    let filters = Filters::new()
        .with(FacetCategory::Countries, "uk")
        .with(FacetCategory::Countries, "fr");
    let found = search(catalog.papers(), "", &filters, catalog.facets());
    assert_eq!(ids(&found), vec!["5", "8", "11"]);
}

#[test]
fn test_year_ids_are_date_prefixes() {
    let catalog = Catalog::sample().unwrap();
    let filters = Filters::new()
        .with(FacetCategory::Years, "2020")
        .with(FacetCategory::Topics, "cv");

    let found = search(catalog.papers(), "", &filters, catalog.facets());
    assert_eq!(ids(&found), vec!["6", "7", "12"]);
}

#[test]
fn test_stale_and_empty_options_match_nothing() {
    let catalog = Catalog::sample().unwrap();

    let robotics = Filters::new().with(FacetCategory::Topics, "robotics");
    assert!(search(catalog.papers(), "", &robotics, catalog.facets()).is_empty());

    let stale = Filters::new().with(FacetCategory::Institutions, "no-such-lab");
    let view = compute_view(
        &catalog,
        &ListingState::default().filters(stale),
        NonZeroUsize::new(6).unwrap(),
    );
    assert!(view.is_empty());
    assert_eq!(view.total_pages, 0);
    assert!(!view.show_pagination);
    assert!(view.has_active_filters);
}

#[test]
fn test_session_navigation_and_reset() {
    let catalog = Catalog::sample().unwrap();
    let mut session = ListingSession::new(&catalog);

    session.dispatch_all(std::iter::repeat(ListingEvent::NextPage).take(5));
    assert_eq!(session.state().page, 3);
    assert_eq!(ids(&session.view().papers), vec!["13", "14"]);

    session.dispatch(ListingEvent::ToggleFilter {
        category: FacetCategory::Topics,
        id: "rl".to_string(),
    });
    assert_eq!(session.state().page, 1);
    assert_eq!(ids(&session.view().papers), vec!["5", "14"]);

    session.dispatch(ListingEvent::Reset);
    assert_eq!(session.state(), &ListingState::default());
    assert_eq!(session.view().total_results, 14);
}

#[test]
fn test_replay_events_from_json() {
    let catalog = Catalog::sample().unwrap();
    let events: Vec<ListingEvent> = serde_json::from_str(
        r#"[
            {"type": "set_page", "page": 2},
            {"type": "select_filter", "category": "years", "id": "2020"},
            {"type": "set_search", "query": "neural"},
            {"type": "previous_page"}
        ]"#,
    )
    .unwrap();

    let mut session = ListingSession::new(&catalog);
    session.dispatch_all(events);

    assert_eq!(session.state().page, 1);
    assert_eq!(session.state().search_query, "neural");
    let view = session.view();
    assert!(view
        .papers
        .iter()
        .all(|p| p.date.starts_with("2020")));
}

#[test]
fn test_view_serializes_papers_in_catalog_format() {
    let catalog = Catalog::sample().unwrap();
    let session = ListingSession::with_page_size(&catalog, NonZeroUsize::new(2).unwrap());
    let value = serde_json::to_value(session.view()).unwrap();

    assert_eq!(value["total_results"], 14);
    assert_eq!(value["total_pages"], 7);
    assert_eq!(value["window"]["pages"], serde_json::json!([1, 2, 3, 4, 5]));
    assert_eq!(value["window"]["show_end_ellipsis"], true);
    assert_eq!(value["papers"][0]["id"], "1");
    assert!(value["papers"][0]["pdfUrl"].is_string());
}

#[test]
fn test_load_catalog_without_facets_derives_them() {
    let file = write_catalog(
        r#"{
            "papers": [
                {"id": "a", "title": "Alpha", "date": "2021-01-01", "topics": ["Robotics"],
                 "institution": "ETH Zurich", "country": "Switzerland",
                 "pdfUrl": "https://example.org/a.pdf"},
                {"id": "b", "title": "Beta", "date": "2022-05-05", "topics": ["Robotics", "Vision"],
                 "institution": "ETH Zurich", "country": "Switzerland",
                 "pdfUrl": "https://example.org/b.pdf"}
            ]
        }"#,
    );

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);

    let robotics = catalog
        .facets()
        .lookup(FacetCategory::Topics, "robotics")
        .unwrap();
    assert_eq!(robotics.count, 2);

    let filters = Filters::new().with(FacetCategory::Topics, robotics.id.clone());
    assert_eq!(
        search(catalog.papers(), "", &filters, catalog.facets()).len(),
        2
    );
}

#[test]
fn test_load_catalog_rejects_duplicate_ids() {
    let file = write_catalog(
        r#"{"papers": [
            {"id": "a", "title": "One", "date": "2021-01-01", "pdfUrl": "https://example.org/1.pdf"},
            {"id": "a", "title": "Two", "date": "2021-01-02", "pdfUrl": "https://example.org/2.pdf"}
        ]}"#,
    );

    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicatePaperId(id) if id == "a"));
}

#[test]
fn test_load_missing_catalog_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_config_points_at_catalog() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("papers.json");
    std::fs::write(
        &catalog_path,
        r#"{"papers": [{"id": "x", "title": "Only", "date": "2019-09-09",
            "pdfUrl": "https://example.org/x.pdf"}]}"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(catalog_path.clone());
    config.listing.page_size = 1;

    let config_path = dir.path().join("config.toml");
    write_config(&config_path, &config, false).unwrap();

    let loaded = load_config(&config_path).unwrap();
    let catalog = Catalog::load(loaded.catalog.path.as_deref().unwrap()).unwrap();
    let session = ListingSession::with_page_size(&catalog, loaded.page_size().unwrap());

    let view = session.view();
    assert_eq!(view.total_pages, 1);
    assert_eq!(ids(&view.papers), vec!["x"]);
}
