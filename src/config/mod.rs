//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `RESEARCH_DASHBOARD_` (nested keys use
//! a double underscore, e.g. `RESEARCH_DASHBOARD_LISTING__PAGE_SIZE=12`).

mod file_config;

pub use file_config::{default_config_path, write_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::listing::DEFAULT_PAGE_SIZE;
use crate::models::ViewMode;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RESEARCH_DASHBOARD";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "research-dashboard.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where papers come from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing screen settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog JSON file (the bundled sample is used when unset)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Listing screen configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Papers per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Layout used when `--view` is not given
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_view: ViewMode::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Page size as a non-zero value
    pub fn page_size(&self) -> Result<NonZeroUsize, config::ConfigError> {
        NonZeroUsize::new(self.listing.page_size).ok_or_else(|| {
            config::ConfigError::Message("listing.page_size must be at least 1".to_string())
        })
    }

    fn validate(self) -> Result<Self, config::ConfigError> {
        self.page_size()?;
        Ok(self)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize::<Config>()?.validate()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(environment())
        .build()?;

    settings.try_deserialize::<Config>()?.validate()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|p| p.is_file())
}
