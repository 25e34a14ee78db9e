//! Colored terminal rendering for the dashboard.
//!
//! Layout decisions live in [`crate::utils::display`]; this module only adds
//! color and writes to stdout.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use owo_colors::{OwoColorize, Style};

use crate::listing::ListingView;
use crate::models::{ChipColor, FacetCategory, FacetOptions, Filters, Paper, ViewMode};
use crate::utils::display::{
    format_links, format_long_date, format_results_summary, format_short_date, format_topics,
    get_listing_table_columns, render_page_bar, terminal_width, truncate_at_word,
    truncate_with_ellipsis, BYLINE_AUTHORS,
};

/// Message shown when nothing matches
pub const EMPTY_TITLE: &str = "No papers found matching your criteria";

/// Hint shown under [`EMPTY_TITLE`]
pub const EMPTY_HINT: &str = "Try adjusting your filters or search query";

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Search => "🔍",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Search,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Terminal style for a chip color
pub fn chip_style(color: ChipColor) -> Style {
    match color {
        ChipColor::Coral => Style::new().red(),
        ChipColor::Teal => Style::new().cyan(),
        ChipColor::Amber => Style::new().yellow(),
        ChipColor::Violet => Style::new().magenta(),
        ChipColor::Emerald => Style::new().green(),
        ChipColor::Blue => Style::new().blue(),
        ChipColor::Rose => Style::new().bright_magenta(),
    }
}

/// Print one listing screen: summary line, papers, and the page bar.
pub fn print_listing(view: &ListingView<'_>, mode: ViewMode, query: &str) {
    if !query.is_empty() {
        println!(
            "{} Results for: \"{}\"",
            status_icon(Status::Search).yellow().bold(),
            query.cyan().bold()
        );
    }
    println!(
        "{}",
        format_results_summary(view.total_results, view.has_active_filters).dimmed()
    );

    if view.is_empty() {
        print_empty_state();
        return;
    }

    match mode {
        ViewMode::Grid => {
            for paper in &view.papers {
                print_paper_card(paper);
            }
        }
        ViewMode::Detailed => {
            println!("{}", papers_table(&view.papers, terminal_width()));
        }
    }

    if view.show_pagination {
        println!();
        println!(
            "  {}  {}",
            render_page_bar(&view.window, view.page, view.total_pages),
            format!("page {} of {}", view.page, view.total_pages).dimmed()
        );
    }
}

/// Print the "nothing matched" panel.
pub fn print_empty_state() {
    println!();
    println!("  {}", EMPTY_TITLE.bold());
    println!("  {}", EMPTY_HINT.dimmed());
}

/// Print a paper as a grid card.
pub fn print_paper_card(paper: &Paper) {
    let width = terminal_width().clamp(40, 100);

    println!();
    println!(
        "{} {}",
        "┌".dimmed(),
        truncate_with_ellipsis(&paper.title, width - 2).blue().bold()
    );
    println!(
        "{} {} {} {}",
        "│".dimmed(),
        paper.author_summary(BYLINE_AUTHORS),
        "·".dimmed(),
        format_short_date(&paper.date).yellow()
    );
    println!(
        "{} {} {} {}, {}",
        "│".dimmed(),
        format_topics(paper).green(),
        "·".dimmed(),
        paper.institution,
        paper.country
    );
    if !paper.r#abstract.is_empty() {
        println!(
            "{} {}",
            "│".dimmed(),
            truncate_at_word(&paper.r#abstract, width - 2).dimmed()
        );
    }
    println!(
        "{} {} {}",
        "└".dimmed(),
        format_links(paper).cyan(),
        format!("#{}", paper.id).dimmed()
    );
}

/// Build the detailed-view table for a page of papers.
pub fn papers_table(papers: &[&Paper], terminal_width: usize) -> Table {
    let (title_width, _, topics_width, _) = get_listing_table_columns(terminal_width);

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Disabled);
    table.set_header(vec!["Paper", "Date", "Topics", "Links"]);

    for paper in papers {
        let heading = format!(
            "{}\n{}",
            truncate_with_ellipsis(&paper.title, title_width),
            truncate_with_ellipsis(&paper.author_summary(BYLINE_AUTHORS), title_width)
        );

        table.add_row(vec![
            Cell::new(heading).add_attribute(Attribute::Bold),
            Cell::new(format_short_date(&paper.date)),
            Cell::new(truncate_with_ellipsis(&format_topics(paper), topics_width)),
            Cell::new(format_links(paper)),
        ]);
    }

    table
}

/// Plain-text listing, one block per paper.
pub fn plain_listing(view: &ListingView<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format_results_summary(
        view.total_results,
        view.has_active_filters,
    ));
    out.push('\n');

    if view.is_empty() {
        out.push_str(EMPTY_TITLE);
        out.push('\n');
        out.push_str(EMPTY_HINT);
        out.push('\n');
        return out;
    }

    for paper in &view.papers {
        out.push_str(&format!(
            "\n[{}] {} ({})\n",
            paper.id,
            paper.title,
            format_short_date(&paper.date)
        ));
        out.push_str(&format!("  {}\n", paper.author_summary(BYLINE_AUTHORS)));
        out.push_str(&format!("  PDF: {}\n", paper.pdf_url));
    }

    if view.show_pagination {
        out.push('\n');
        out.push_str(&render_page_bar(&view.window, view.page, view.total_pages));
        out.push('\n');
    }

    out
}

/// Print the full detail view of one paper.
pub fn print_paper_detail(paper: &Paper) {
    print_section(&paper.title);
    println!();
    println!("  {} {}", "Published:".bold(), format_long_date(&paper.date));
    println!("  {} {}", "Authors:".bold(), paper.authors.join(", "));
    println!(
        "  {} {}, {}",
        "Affiliation:".bold(),
        paper.institution,
        paper.country
    );
    println!("  {} {}", "Topics:".bold(), format_topics(paper).green());

    if !paper.r#abstract.is_empty() {
        print_section("Abstract");
        println!();
        println!("  {}", paper.r#abstract);
    }

    print_section("Links");
    println!();
    println!("  {} {}", "PDF:".bold(), paper.pdf_url.cyan());
    if let Some(html) = &paper.html_url {
        println!("  {} {}", "HTML:".bold(), html.cyan());
    }
    if let Some(github) = &paper.github_url {
        println!("  {} {}", "Code:".bold(), github.cyan());
    }
}

/// Print facet option lists with counts; selected options are marked.
pub fn print_facets(options: &FacetOptions, filters: &Filters, only: Option<FacetCategory>) {
    for category in FacetCategory::ALL {
        if only.is_some_and(|c| c != category) {
            continue;
        }

        print_section(category.name());
        for option in options.options(category) {
            let marker = if filters.is_selected(category, &option.id) {
                "●".green().bold().to_string()
            } else {
                "○".dimmed().to_string()
            };
            println!(
                "  {} {} {} {}",
                marker,
                option.label.style(chip_style(option.color)),
                format!("({})", option.count).dimmed(),
                format!("[{}]", option.id).dimmed()
            );
        }
    }
}
