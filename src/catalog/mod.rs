//! In-memory paper catalog and its loaders.
//!
//! A catalog is a JSON document holding the papers and, optionally, the
//! facet option lists shown in the filter sidebar:
//!
//! ```json
//! {
//!   "papers": [
//!     {
//!       "id": "1",
//!       "title": "Attention Is All You Need",
//!       "authors": ["Ashish Vaswani", "Noam Shazeer"],
//!       "abstract": "...",
//!       "date": "2017-06-12",
//!       "topics": ["NLP"],
//!       "institution": "Google Research",
//!       "country": "USA",
//!       "pdfUrl": "https://arxiv.org/pdf/1706.03762"
//!     }
//!   ],
//!   "facets": {
//!     "topics": [{ "id": "nlp", "label": "NLP", "count": 1, "color": "teal" }],
//!     "years": [{ "id": "2017", "label": "2017", "count": 1, "color": "amber" }]
//!   }
//! }
//! ```
//!
//! When `facets` is absent the options are derived from the papers.

mod facets;

pub use facets::{derive_facets, slugify};

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{FacetCategory, FacetOptions, Paper};
use crate::utils::validate_paper;

const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate paper id '{0}'")]
    DuplicatePaperId(String),

    #[error("Duplicate {category} option id '{id}'")]
    DuplicateOptionId { category: FacetCategory, id: String },

    #[error("Paper '{0}' not found")]
    PaperNotFound(String),
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    papers: Vec<Paper>,

    #[serde(default)]
    facets: Option<FacetOptions>,
}

/// Papers plus the facet options used to filter them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    papers: Vec<Paper>,
    facets: FacetOptions,
}

impl Catalog {
    /// Create a catalog from papers and explicit facet options
    pub fn new(papers: Vec<Paper>, facets: FacetOptions) -> Result<Self, CatalogError> {
        check_unique_papers(&papers)?;
        check_unique_options(&facets)?;

        for paper in &papers {
            for problem in validate_paper(paper) {
                tracing::warn!(paper = %paper.id, "{}", problem);
            }
        }

        Ok(Self { papers, facets })
    }

    /// Create a catalog whose facet options are derived from the papers
    pub fn with_derived_facets(papers: Vec<Paper>) -> Result<Self, CatalogError> {
        let facets = derive_facets(&papers);
        Self::new(papers, facets)
    }

    /// Parse a catalog document
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        match file.facets {
            Some(facets) => Self::new(file.papers, facets),
            None => Self::with_derived_facets(file.papers),
        }
    }

    /// Load a catalog document from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            papers = catalog.len(),
            options = catalog.facets.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The catalog bundled with the binary
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json_str(SAMPLE_CATALOG)
    }

    /// All papers, in catalog order
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Facet option lists
    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    /// Number of papers
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Check if the catalog has no papers
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Look up a paper by id
    pub fn get(&self, id: &str) -> Option<&Paper> {
        self.papers.iter().find(|p| p.id == id)
    }

    /// Look up a paper by id, returning an error if not found
    pub fn require(&self, id: &str) -> Result<&Paper, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::PaperNotFound(id.to_string()))
    }
}

fn check_unique_papers(papers: &[Paper]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for paper in papers {
        if !seen.insert(paper.id.as_str()) {
            return Err(CatalogError::DuplicatePaperId(paper.id.clone()));
        }
    }
    Ok(())
}

fn check_unique_options(facets: &FacetOptions) -> Result<(), CatalogError> {
    for category in FacetCategory::ALL {
        let mut seen = HashSet::new();
        for option in facets.options(category) {
            if !seen.insert(option.id.as_str()) {
                return Err(CatalogError::DuplicateOptionId {
                    category,
                    id: option.id.clone(),
                });
            }
        }
    }
    Ok(())
}
