//! bpost - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bpost::cli::{Cli, Commands, ConfigCommands};

/// Install the stderr log subscriber. `RUST_LOG` wins over `--log-level`.
#[cfg(not(tarpaulin_include))]
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config_file = cli.config.as_deref();
    match cli.command {
        Commands::Video(args) => commands::video::handle(&args, config_file),
        Commands::Footprint(args) => commands::footprint::handle(&args, config_file),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_file),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
