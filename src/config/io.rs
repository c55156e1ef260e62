//! Configuration I/O operations

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Get the config file path (~/.config/bpost/config.toml on Linux)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Get the config directory path (~/.config/bpost on Linux)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("bpost"))
}

/// Load configuration from the default location, or return defaults if not found
pub fn load() -> Result<Config> {
    let config_path = config_path()?;

    if config_path.exists() {
        load_file(&config_path)
    } else {
        Ok(Config::default())
    }
}

/// Load configuration from an explicit file, which must exist
pub fn load_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    Ok(config)
}
