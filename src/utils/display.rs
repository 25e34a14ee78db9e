//! Terminal formatting helpers for listing output.
//!
//! Everything here returns plain strings so that the layout can be tested
//! without a terminal; coloring happens in [`crate::ui`].

use chrono::NaiveDate;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

use crate::listing::PageWindow;
use crate::models::Paper;

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Authors listed before collapsing the rest into "+N".
pub const BYLINE_AUTHORS: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| Terminal {
        width: terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH),
        is_tty: io::stdout().is_terminal(),
    })
}

/// Current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(1)
}

/// Display width of a string, counting wide characters as two columns.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Truncate text to `max_width` display columns, ending with "..." if cut.
///
/// ```
/// use research_dashboard::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Segment Anything", 10), "Segment...");
/// assert_eq!(truncate_with_ellipsis("NeRF", 10), "NeRF");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut used = 0;
    let kept: String = text
        .chars()
        .take_while(|c| {
            used += char_width(*c);
            used <= budget
        })
        .collect();

    format!("{}...", kept.trim_end())
}

/// Like [`truncate_with_ellipsis`], but prefers cutting at a word boundary.
pub fn truncate_at_word(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let cut = truncate_with_ellipsis(text, max_width);
    let kept = cut.trim_end_matches("...");
    match kept.rfind(' ') {
        // keep at least half the budget so a single long word does not vanish
        Some(space) if space * 2 >= kept.len() => format!("{}...", kept[..space].trim_end()),
        _ => cut,
    }
}

/// Short date for table cells, e.g. "Jun 12, 2017".
///
/// Unparseable dates are shown as given.
pub fn format_short_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Long date for the detail view, e.g. "Monday, June 12, 2017".
pub fn format_long_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Link badges available for a paper, e.g. "PDF · HTML · Code".
pub fn format_links(paper: &Paper) -> String {
    let mut links = vec!["PDF"];
    if paper.html_url.is_some() {
        links.push("HTML");
    }
    if paper.has_code() {
        links.push("Code");
    }
    links.join(" · ")
}

/// Comma-separated topic labels.
pub fn format_topics(paper: &Paper) -> String {
    paper.topics.join(", ")
}

/// Results summary line, e.g. "Showing 14 papers (filtered)".
pub fn format_results_summary(total_results: usize, has_active_filters: bool) -> String {
    let noun = if total_results == 1 { "paper" } else { "papers" };
    let mut line = format!("Showing {} {}", total_results, noun);
    if has_active_filters {
        line.push_str(" (filtered)");
    }
    line
}

/// Render the pagination control as text.
///
/// The current page is bracketed, disabled arrows are blanked out, and the
/// first/last jump buttons appear alongside their ellipses:
/// `‹ 1 … 4 5 [6] 7 8 … 10 ›`.
pub fn render_page_bar(window: &PageWindow, current: i64, total_pages: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(if current > 1 { "‹" } else { " " }.to_string());

    if window.show_start_ellipsis {
        parts.push("1".to_string());
        parts.push("…".to_string());
    }

    for &page in &window.pages {
        if page as i64 == current {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }

    if window.show_end_ellipsis {
        parts.push("…".to_string());
        parts.push(total_pages.to_string());
    }

    parts.push(if current < total_pages as i64 { "›" } else { " " }.to_string());

    parts.join(" ")
}

/// Column widths for the detailed papers table.
///
/// Returns (title_width, date_width, topics_width, links_width).
pub fn get_listing_table_columns(terminal_width: usize) -> (usize, usize, usize, usize) {
    // fixed: date "Sep 30, 2020" and links "PDF · HTML · Code"
    const DATE: usize = 12;
    const LINKS: usize = 17;
    // borders and padding of a four-column UTF8 table
    const CHROME: usize = 13;

    let flexible = terminal_width.saturating_sub(DATE + LINKS + CHROME);
    let title = (flexible * 2 / 3).max(24);
    let topics = flexible.saturating_sub(title).max(12);

    (title, DATE, topics, LINKS)
}
