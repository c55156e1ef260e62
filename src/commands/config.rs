//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use bpost::Config;

/// Show the effective file configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_file: Option<&Path>) -> Result<()> {
    let config = Config::load_from(config_file)?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Print where the configuration file is looked up.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

fn render(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
