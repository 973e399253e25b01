//! Report configuration
//!
//! Settings come from an optional JSON file; command line flags override the
//! data source and cache lifetime.

use crate::data::DEFAULT_TTL;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "cost_report.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Command line arguments.
#[derive(Parser, Debug, Default)]
#[command(name = "cost-report", version, about = "Monthly utility cost report")]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Spreadsheet or CSV file with YEAR, MONTH, COST and ELECTRICITY columns
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Seconds before the loaded data is read again
    #[arg(long)]
    pub ttl_secs: Option<u64>,
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Source spreadsheet
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Lifetime of the cached dataset in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Report heading, followed by the year range
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/costs.xlsx")
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_title() -> String {
    "MONTHLY COSTS".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            title: default_title(),
            currency_symbol: default_currency(),
        }
    }
}

impl ReportConfig {
    /// Load settings from `path`, or defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config file named on the command line and apply overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Ok(Self::load(&path)?.with_overrides(cli))
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(data) = &cli.data {
            self.data_path = data.clone();
        }
        if let Some(ttl) = cli.ttl_secs {
            self.cache_ttl_secs = ttl;
        }
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/costs.xlsx"));
        assert_eq!(config.cache_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.title, "MONTHLY COSTS");
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ReportConfig::load(&temp_dir.path().join("none.json")).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        fs::write(&path, r#"{ "data_path": "vic/costs.xlsx", "title": "VIC" }"#).unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("vic/costs.xlsx"));
        assert_eq!(config.title, "VIC");
        assert_eq!(config.cache_ttl_secs, 86_400);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ReportConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        fs::write(&path, r#"{ "data_path": "a.xlsx", "cache_ttl_secs": 60 }"#).unwrap();

        let cli = Cli::try_parse_from([
            "cost-report",
            "--config",
            path.to_str().unwrap(),
            "--data",
            "b.csv",
        ])
        .unwrap();
        let config = ReportConfig::from_cli(&cli).unwrap();

        assert_eq!(config.data_path, PathBuf::from("b.csv"));
        assert_eq!(config.cache_ttl_secs, 60);

        let cli = Cli::try_parse_from(["cost-report", "--ttl-secs", "5"]).unwrap();
        let config = ReportConfig::default().with_overrides(&cli);
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.data_path, PathBuf::from("data/costs.xlsx"));
    }
}
