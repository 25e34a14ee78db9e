//! Field checks for papers loaded into a catalog.
//!
//! None of these checks affect filtering; they flag records that will render
//! badly (unparseable dates, links that cannot be opened).

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Paper;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid paper ID: {0}")]
    InvalidPaperId(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Validate a paper ID
///
/// IDs are used as lookup keys on the command line, so they must be
/// non-empty and free of whitespace and control characters.
pub fn validate_paper_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::InvalidPaperId("empty ID".to_string()));
    }

    if id.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidPaperId(format!(
            "'{}' contains whitespace",
            id
        )));
    }

    if id.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidPaperId(
            "contains control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a link target
///
/// Only absolute http and https URLs can be opened from the dashboard.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "unsupported scheme: {}",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }

    Ok(())
}

/// Validate an ISO calendar date
pub fn validate_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Run every field check on a paper and collect the problems
pub fn validate_paper(paper: &Paper) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    if let Err(e) = validate_paper_id(&paper.id) {
        problems.push(e);
    }
    if paper.title.trim().is_empty() {
        problems.push(ValidationError::MissingField("title"));
    }
    if let Err(e) = validate_date(&paper.date) {
        problems.push(e);
    }
    if let Err(e) = validate_url(&paper.pdf_url) {
        problems.push(e);
    }

    let optional_links = [&paper.html_url, &paper.github_url, &paper.thumbnail_url];
    for url in optional_links.into_iter().flatten() {
        if let Err(e) = validate_url(url) {
            problems.push(e);
        }
    }

    problems
}
