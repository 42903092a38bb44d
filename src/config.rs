//! Application configuration loaded from `quotebox.toml`
//!
//! Every field is optional; CLI flags override config values, and config
//! values override the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::PageLimits;

/// Port the server binds when neither flag nor config names one
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuoteboxConfig {
    /// Path to the SQLite database file
    pub database: Option<String>,
    /// Port for the HTTP server
    pub port: Option<u16>,
    /// Default page size for quote listings
    pub per_page: Option<usize>,
    /// Hard upper bound on the page size
    pub max_per_page: Option<usize>,
}

impl QuoteboxConfig {
    /// Pagination limits with config overrides applied
    pub fn page_limits(&self) -> PageLimits {
        let defaults = PageLimits::default();
        PageLimits {
            default_per_page: self.per_page.unwrap_or(defaults.default_per_page),
            max_per_page: self.max_per_page.unwrap_or(defaults.max_per_page),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("quotebox.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("quotebox.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<QuoteboxConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: QuoteboxConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &QuoteboxConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotebox.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotebox.toml");

        let config = QuoteboxConfig {
            database: Some("quotes.db".to_string()),
            port: Some(8080),
            per_page: Some(10),
            max_per_page: None,
        };
        write_config(&path, &config, false).unwrap();

        // refuses to clobber without force
        assert!(write_config(&path, &config, false).is_err());

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("quotes.db"));
        assert_eq!(loaded.port, Some(8080));

        let limits = loaded.page_limits();
        assert_eq!(limits.default_per_page, 10);
        assert_eq!(limits.max_per_page, 100);
    }
}
