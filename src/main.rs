use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use research_dashboard::catalog::Catalog;
use research_dashboard::config::{
    default_config_path, find_config_file, get_config, load_config, write_config, Config,
    LogFormat, ENV_PREFIX,
};
use research_dashboard::listing::{ListingSession, ListingView};
use research_dashboard::models::{
    FacetCategory, FacetOptions, Filters, ListingEvent, ListingState, Paper, ViewMode,
};
use research_dashboard::ui;
use research_dashboard::utils::{is_terminal, suggest_option};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Dashboard - Browse, search and filter a catalog of research papers
#[derive(Parser, Debug)]
#[command(name = "research-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Browse, search and filter a catalog of research papers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Listing layout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ViewArg {
    /// Cards
    Grid,
    /// One table row per paper
    Detailed,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::Detailed => ViewMode::Detailed,
        }
    }
}

/// Facet selections given on the command line (option id or label)
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Topic filter (repeatable)
    #[arg(long, short)]
    topic: Vec<String>,

    /// Country filter (repeatable)
    #[arg(long)]
    country: Vec<String>,

    /// Institution filter (repeatable)
    #[arg(long, short)]
    institution: Vec<String>,

    /// Year filter (repeatable)
    #[arg(long, short)]
    year: Vec<String>,
}

impl FilterArgs {
    fn values(&self, category: FacetCategory) -> &[String] {
        match category {
            FacetCategory::Topics => &self.topic,
            FacetCategory::Countries => &self.country,
            FacetCategory::Institutions => &self.institution,
            FacetCategory::Years => &self.year,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List papers matching a search query and filters
    #[command(alias = "ls")]
    List {
        /// Search text matched against titles and abstracts
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-indexed)
        #[arg(long, short, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Papers per page (default from config)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,

        /// Layout (default from config)
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
    },

    /// Show one paper in full
    Show {
        /// Paper ID
        id: String,
    },

    /// List facet options with their counts
    #[command(alias = "f")]
    Facets {
        /// Only show this facet (topics, countries, institutions, years)
        #[arg(long, short)]
        category: Option<FacetCategory>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Apply a JSON array of listing events and show the resulting screen
    Replay {
        /// File containing the events
        file: PathBuf,

        /// Papers per page (default from config)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,

        /// Layout (default from config)
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Research Dashboard - Environment Variables");
    println!();
    println!("Catalog:");
    println!("  {}_CATALOG__PATH          Catalog JSON file", ENV_PREFIX);
    println!();
    println!("Listing:");
    println!("  {}_LISTING__PAGE_SIZE     Papers per page (default: 6)", ENV_PREFIX);
    println!("  {}_LISTING__DEFAULT_VIEW  grid or detailed (default: grid)", ENV_PREFIX);
    println!();
    println!("Logging:");
    println!("  {}_LOGGING__LEVEL         Default log level (default: warn)", ENV_PREFIX);
    println!("  {}_LOGGING__FORMAT        pretty or json (default: pretty)", ENV_PREFIX);
    println!("  RUST_LOG                                   Overrides the log filter entirely");
    println!();
    println!("Example:");
    println!("  export {}_LISTING__PAGE_SIZE=12", ENV_PREFIX);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to load configuration")?,
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.clone());
    }

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = resolve_format(cli.output);

    match cli.command {
        None => {
            let catalog = open_catalog(&config)?;
            let session = ListingSession::with_page_size(&catalog, config.page_size()?);
            output_listing(&session.view(), "", config.listing.default_view, format)?;
        }

        Some(Commands::List {
            query,
            filters,
            page,
            page_size,
            view,
        }) => {
            let catalog = open_catalog(&config)?;
            let query = query.unwrap_or_default();
            let selected = resolve_filters(catalog.facets(), &filters);

            let page_size = match page_size {
                Some(size) => size,
                None => config.page_size()?,
            };
            let state = ListingState::new(query.clone())
                .filters(selected)
                .page(page);
            let session = ListingSession::with_page_size(&catalog, page_size).from_state(state);

            let mode = view.map(ViewMode::from).unwrap_or(config.listing.default_view);
            output_listing(&session.view(), &query, mode, format)?;
        }

        Some(Commands::Show { id }) => {
            let catalog = open_catalog(&config)?;
            let paper = catalog.require(&id)?;
            output_paper(paper, format)?;
        }

        Some(Commands::Facets { category, filters }) => {
            let catalog = open_catalog(&config)?;
            let selected = resolve_filters(catalog.facets(), &filters);
            match format {
                OutputFormat::Json => {
                    let json = match category {
                        Some(c) => serde_json::to_string_pretty(catalog.facets().options(c))?,
                        None => serde_json::to_string_pretty(catalog.facets())?,
                    };
                    println!("{}", json);
                }
                OutputFormat::Plain => {
                    for c in FacetCategory::ALL {
                        if category.is_some_and(|only| only != c) {
                            continue;
                        }
                        for option in catalog.facets().options(c) {
                            println!("{}\t{}\t{}\t{}", c, option.id, option.label, option.count);
                        }
                    }
                }
                _ => ui::print_facets(catalog.facets(), &selected, category),
            }
        }

        Some(Commands::Replay {
            file,
            page_size,
            view,
        }) => {
            let catalog = open_catalog(&config)?;
            let events = read_events(&file)?;
            tracing::debug!(count = events.len(), "Replaying listing events");

            let page_size = match page_size {
                Some(size) => size,
                None => config.page_size()?,
            };
            let mut session = ListingSession::with_page_size(&catalog, page_size);
            session.dispatch_all(events);

            let mode = view.map(ViewMode::from).unwrap_or(config.listing.default_view);
            let query = session.state().search_query.clone();
            output_listing(&session.view(), &query, mode, format)?;
        }

        Some(Commands::Config(ConfigCommands::Init { path, force })) => {
            let path = path
                .or_else(default_config_path)
                .context("Could not determine a config directory; pass --path")?;
            write_config(&path, &Config::default(), force)?;
            if !cli.quiet {
                ui::print_status(
                    ui::Status::Success,
                    &format!("Wrote {}", path.display()),
                );
            }
        }

        Some(Commands::Config(ConfigCommands::Show)) => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            _ => print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?
            ),
        },

        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(
                shell,
                &mut command,
                "research-dashboard",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Initialize tracing based on verbosity, `RUST_LOG` and the config file
fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("research_dashboard={}", env_filter)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn open_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => {
            tracing::debug!("No catalog configured, using the bundled sample");
            Catalog::sample().context("Bundled sample catalog is invalid")
        }
    }
}

/// Turn command-line facet values into selected option ids
///
/// Values may be option ids or labels. Unknown values are still selected
/// after a warning with the closest known option. An unknown topic, country
/// or institution matches nothing; an unknown year is still used as a
/// literal date prefix, so `20` matches every paper from the 2000s.
fn resolve_filters(options: &FacetOptions, args: &FilterArgs) -> Filters {
    let mut filters = Filters::new();

    for category in FacetCategory::ALL {
        for input in args.values(category) {
            match options.lookup(category, input) {
                Some(option) => {
                    filters.select(category, option.id.clone());
                }
                None if category == FacetCategory::Years => {
                    tracing::warn!("'{}' is not a listed year; used as a date prefix", input);
                    filters.select(category, input.clone());
                }
                None => {
                    match suggest_option(options, category, input) {
                        Some(suggestion) => tracing::warn!(
                            "Unknown {} '{}', did you mean '{}' ({})?",
                            category,
                            input,
                            suggestion.id,
                            suggestion.label
                        ),
                        None => tracing::warn!("Unknown {} '{}'", category, input),
                    }
                    filters.select(category, input.clone());
                }
            }
        }
    }

    filters
}

fn read_events(path: &Path) -> Result<Vec<ListingEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid events file {}", path.display()))
}

fn output_listing(
    view: &ListingView<'_>,
    query: &str,
    mode: ViewMode,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
        OutputFormat::Plain => print!("{}", ui::plain_listing(view)),
        _ => ui::print_listing(view, mode, query),
    }
    Ok(())
}

fn output_paper(paper: &Paper, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(paper)?),
        OutputFormat::Plain => {
            println!("{} ({})", paper.title, paper.date);
            println!("  Authors: {}", paper.authors.join(", "));
            println!("  Topics: {}", paper.topics.join(", "));
            println!("  {}, {}", paper.institution, paper.country);
            println!("  PDF: {}", paper.pdf_url);
            if let Some(html) = &paper.html_url {
                println!("  HTML: {}", html);
            }
            if let Some(github) = &paper.github_url {
                println!("  Code: {}", github);
            }
            if !paper.r#abstract.is_empty() {
                println!();
                println!("{}", paper.r#abstract);
            }
        }
        _ => ui::print_paper_detail(paper),
    }
    Ok(())
}
