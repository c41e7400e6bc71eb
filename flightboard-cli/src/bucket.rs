//! `flightboard bucket`: offline histogram of a saved delay distribution

use anyhow::{Context, Result};
use clap::Args;
use flightboard_charts::payload::DelayDistribution;
use flightboard_charts::{BucketResult, BucketSpec};
use flightboard_common::{DashboardConfig, HistogramConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct BucketArgs {
    /// JSON file shaped like the /api/delay-distribution response
    #[arg(short, long)]
    input: PathBuf,

    /// Comma separated bin edges (default: from configuration)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    boundaries: Vec<f64>,

    /// Comma separated bin labels (default: "lo-hi" ranges)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    labels: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn handle_command(args: BucketArgs, config: DashboardConfig) -> Result<()> {
    let spec = resolve_spec(&args, &config.delay_histogram)?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let distribution: DelayDistribution = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a delay distribution", args.input.display()))?;

    let result = spec.aggregate(distribution.observations()?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&result);
    }
    Ok(())
}

/// Command-line bins win over configured ones
fn resolve_spec(args: &BucketArgs, configured: &HistogramConfig) -> Result<BucketSpec> {
    let histogram = if args.boundaries.is_empty() {
        configured.clone()
    } else {
        HistogramConfig {
            boundaries: args.boundaries.clone(),
            labels: None,
        }
    };

    let histogram = if args.labels.is_empty() {
        histogram
    } else {
        HistogramConfig {
            labels: Some(args.labels.clone()),
            ..histogram
        }
    };

    Ok(BucketSpec::try_from(&histogram)?)
}

fn print_table(result: &BucketResult) {
    println!("{:<16} {:>10}", "Bucket", "Count");
    println!("{}", "-".repeat(27));
    for (label, total) in result.iter() {
        println!("{:<16} {:>10}", label, total);
    }
    println!("{}", "-".repeat(27));
    println!("{:<16} {:>10}", "total", result.total());
    println!("{:<16} {:>10}", "out of range", result.dropped);
}
