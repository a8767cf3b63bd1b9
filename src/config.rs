//! Configuration management for sniff-info
//!
//! Settings live in `~/.config/sniff-info/config.toml`. Every field is
//! optional; CLI flags take priority over the file, which overrides the
//! built-in defaults.
//!
//! ```toml
//! [report]
//! limit = 10
//! format = "text"
//!
//! [matcher]
//! strategy = "indexed"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::matcher::MatchStrategy;
use crate::render::OutputFormat;
use crate::report::DEFAULT_TOP_LIMIT;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Number of operations listed in sort mode
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_limit() -> usize {
    DEFAULT_TOP_LIMIT
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            format: OutputFormat::default(),
        }
    }
}

/// Matcher configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfig {
    #[serde(default)]
    pub strategy: MatchStrategy,
}

impl Config {
    /// Get the config file path (~/.config/sniff-info/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("sniff-info").join("config.toml"))
    }

    /// Load the default config file, or return defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load a specific config file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse and validate TOML config contents
    pub fn parse_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.report.limit == 0 {
            return Err("report.limit must be > 0".to_string());
        }
        Ok(())
    }
}
