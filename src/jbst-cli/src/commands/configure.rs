//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting jbst CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(output_dir: Option<PathBuf>, extension: Option<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, output_dir, extension) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Copy provided settings into the config; false when nothing was given
fn apply(config: &mut Config, output_dir: Option<PathBuf>, extension: Option<String>) -> bool {
    let changed = output_dir.is_some() || extension.is_some();

    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(ext) = extension {
        config.extension = Some(ext.trim_start_matches('.').to_string());
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Output directory: {}", config.output_dir(None).display());
    println!("Extension: {}", config.extension(None));

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: jbst configure --output-dir DIR --extension EXT");
    println!("   or: jbst configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_nothing() {
        let mut config = Config::default();
        assert!(!apply(&mut config, None, None));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        assert!(apply(&mut config, Some("out".into()), Some(".bms".into())));
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.extension.as_deref(), Some("bms"));

        // unset fields keep their value
        assert!(apply(&mut config, None, Some("seq".into())));
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.extension.as_deref(), Some("seq"));
    }
}
