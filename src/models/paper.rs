//! Paper model representing a research paper in the dashboard catalog.

use serde::{Deserialize, Serialize};

/// A research paper shown on the dashboard
///
/// Papers are immutable once loaded into a [`Catalog`](crate::catalog::Catalog);
/// the listing engine only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Unique identifier within the catalog
    pub id: String,

    /// Paper title
    pub title: String,

    /// Author names, in byline order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract text
    #[serde(default)]
    pub r#abstract: String,

    /// Publication date (ISO format, e.g. "2023-05-01")
    pub date: String,

    /// Topic labels
    #[serde(default)]
    pub topics: Vec<String>,

    /// Institution name
    #[serde(default)]
    pub institution: String,

    /// Country name
    #[serde(default)]
    pub country: String,

    /// Primary document (PDF) URL
    pub pdf_url: String,

    /// HTML version of the paper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// Source code repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    /// Preview image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Paper {
    /// Create a new paper with required fields
    pub fn new(id: String, title: String, date: String, pdf_url: String) -> Self {
        Self {
            id,
            title,
            authors: Vec::new(),
            r#abstract: String::new(),
            date,
            topics: Vec::new(),
            institution: String::new(),
            country: String::new(),
            pdf_url,
            html_url: None,
            github_url: None,
            thumbnail_url: None,
        }
    }

    /// The four-character year prefix of the publication date, if present
    pub fn year(&self) -> Option<&str> {
        self.date.get(..4).filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    /// Byline that lists at most `limit` authors followed by "+N" for the rest
    pub fn author_summary(&self, limit: usize) -> String {
        let shown = self
            .authors
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let hidden = self.authors.len().saturating_sub(limit);
        if hidden > 0 {
            format!("{} +{}", shown, hidden)
        } else {
            shown
        }
    }

    /// Check whether the paper carries a given topic label
    pub fn has_topic(&self, label: &str) -> bool {
        self.topics.iter().any(|t| t == label)
    }

    /// Check if the paper links to a source repository
    pub fn has_code(&self) -> bool {
        self.github_url.is_some()
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with the identifying fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            paper: Paper::new(id.into(), title.into(), String::new(), String::new()),
        }
    }

    /// Add an author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.paper.authors.push(author.into());
        self
    }

    /// Set all authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paper.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.r#abstract = abstract_text.into();
        self
    }

    /// Set publication date
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.paper.date = date.into();
        self
    }

    /// Add a topic label
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.paper.topics.push(topic.into());
        self
    }

    /// Set institution
    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.paper.institution = institution.into();
        self
    }

    /// Set country
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.paper.country = country.into();
        self
    }

    /// Set PDF URL
    pub fn pdf_url(mut self, url: impl Into<String>) -> Self {
        self.paper.pdf_url = url.into();
        self
    }

    /// Set HTML URL
    pub fn html_url(mut self, url: impl Into<String>) -> Self {
        self.paper.html_url = Some(url.into());
        self
    }

    /// Set source repository URL
    pub fn github_url(mut self, url: impl Into<String>) -> Self {
        self.paper.github_url = Some(url.into());
        self
    }

    /// Set thumbnail URL
    pub fn thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.paper.thumbnail_url = Some(url.into());
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
