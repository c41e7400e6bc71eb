use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flightboard_common::{ConfigSource, DashboardConfig, load_config};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod bucket;
mod charts;
mod config;

#[derive(Parser)]
#[command(name = "flightboard")]
#[command(about = "Airline performance dashboard chart builder")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "FLIGHTBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch endpoint data and build chart configurations
    Charts(charts::ChartsArgs),
    /// Bucket a delay distribution file into histogram bins
    Bucket(bucket::BucketArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File or defaults, then environment overrides
fn resolve_config(path: Option<PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(path) => {
            let mut config = load_config(ConfigSource::File(path.clone()))
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env();
            Ok(config)
        }
        None => Ok(load_config(ConfigSource::Environment)?),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match resolve_config(cli.config) {
        Ok(config) => match cli.command {
            Commands::Charts(args) => charts::handle_command(args, config).await,
            Commands::Bucket(args) => bucket::handle_command(args, config),
            Commands::Config { action } => config::handle_command(action, config),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
