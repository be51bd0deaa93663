//! Configuration management for jbst CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory when neither the command line nor the config names one
pub const DEFAULT_OUTPUT_DIR: &str = "extracted";

/// Extension for extracted sequences
pub const DEFAULT_EXTENSION: &str = "minibms";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("jbst");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Output directory, preferring an explicit command-line value
    pub fn output_dir(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Sequence file extension without a leading dot
    pub fn extension(&self, arg: Option<String>) -> String {
        let ext = arg
            .or_else(|| self.extension.clone())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        ext.trim_start_matches('.').to_string()
    }
}
