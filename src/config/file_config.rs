//! Configuration file support for research-dashboard.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! path = "~/papers/catalog.json"
//!
//! [listing]
//! page_size = 6
//! default_view = "grid"   # or "detailed"
//!
//! [logging]
//! level = "warn"
//! format = "pretty"       # or "json"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// Default location of the user config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("research-dashboard").join("config.toml"))
}

/// Write a configuration as TOML
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_config(path: &Path, config: &Config, force: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::Exists(path.to_path_buf()));
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    tracing::info!(path = %path.display(), "Wrote configuration file");
    Ok(())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Config file already exists: {} (use --force to overwrite)", .0.display())]
    Exists(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::models::ViewMode;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.listing.page_size = 9;
        config.listing.default_view = ViewMode::Detailed;
        config.catalog.path = Some(PathBuf::from("papers.json"));

        write_config(&path, &config, false).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_config(&path, &Config::default(), false).unwrap();
        let again = write_config(&path, &Config::default(), false);
        assert!(matches!(again, Err(ConfigFileError::Exists(_))));

        assert!(write_config(&path, &Config::default(), true).is_ok());
    }

    #[test]
    fn test_default_config_serializes() {
        let content = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(content.contains("[listing]"));
        assert!(content.contains("page_size = 6"));
    }
}
