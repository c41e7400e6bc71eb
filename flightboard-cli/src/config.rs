use anyhow::{Context, Result};
use clap::Subcommand;
use flightboard_charts::BucketSpec;
use flightboard_common::{load_config, save_config, ConfigSource, DashboardConfig};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (file, then environment overrides)
    Show,
    /// Write the default configuration to a file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "flightboard.toml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Check the effective configuration without contacting the API
    Validate,
}

pub fn handle_command(command: ConfigCommands, config: DashboardConfig) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommands::Init { output, force } => init_config(&output, force),
        ConfigCommands::Validate => validate_config(&config),
    }
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }
    save_config(&load_config(ConfigSource::Default)?, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote default configuration to {}", output.display());
    Ok(())
}

fn validate_config(config: &DashboardConfig) -> Result<()> {
    config.validate()?;
    let spec = BucketSpec::try_from(&config.delay_histogram)
        .context("invalid delay_histogram configuration")?;
    flightboard_charts::ChartId::parse_list(&config.charts)?;

    println!("configuration OK ({} delay buckets)", spec.len());
    Ok(())
}
