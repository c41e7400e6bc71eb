//! `flightboard charts`: fetch endpoint data and write chart configurations

use anyhow::{bail, Context, Result};
use clap::Args;
use flightboard_charts::{build_dashboard, BucketSpec, ChartId, ChartOutcome, HttpDataSource};
use flightboard_common::DashboardConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args)]
pub struct ChartsArgs {
    /// Analytics API base URL (overrides the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Write one <chart>.json per chart into this directory (default: output_dir from config)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print a single {id: config} JSON object instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Chart to build; repeat for several. Defaults to the configured charts, or all
    #[arg(long = "chart", value_name = "ID")]
    charts: Vec<String>,
}

pub async fn handle_command(args: ChartsArgs, mut config: DashboardConfig) -> Result<()> {
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = base_url;
    }
    config.validate()?;

    let delay_spec = BucketSpec::try_from(&config.delay_histogram)
        .context("invalid delay_histogram configuration")?;
    let requested = if args.charts.is_empty() { &config.charts } else { &args.charts };
    let ids = ChartId::parse_list(requested)?;

    let source = HttpDataSource::from_config(&config)?;
    info!("building {} chart(s) from {}", ids.len(), config.base_url);
    let outcomes = build_dashboard(&source, &delay_spec, &ids).await;

    match resolve_output(&args, &config) {
        Output::Dir(dir) => write_chart_files(&dir, &outcomes)?,
        Output::Stdout => println!("{}", serde_json::to_string_pretty(&charts_object(&outcomes))?),
    }

    print_summary(&outcomes);

    let invalid = outcomes
        .iter()
        .filter(|o| matches!(&o.chart, Err(e) if e.is_validation()))
        .count();
    if invalid > 0 {
        warn!("{} chart(s) rejected their payload as malformed", invalid);
    }

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.id.as_str())
        .collect();
    if !failed.is_empty() {
        bail!("{} chart(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Output {
    Stdout,
    Dir(PathBuf),
}

/// `--stdout` prints; otherwise `--output`, falling back to the configured output_dir
fn resolve_output(args: &ChartsArgs, config: &DashboardConfig) -> Output {
    if args.stdout {
        Output::Stdout
    } else {
        Output::Dir(args.output.clone().unwrap_or_else(|| config.output_dir.clone()))
    }
}

/// `{id: config}` for every chart that built
fn charts_object(outcomes: &[ChartOutcome]) -> serde_json::Map<String, serde_json::Value> {
    outcomes
        .iter()
        .filter_map(|o| o.chart.as_ref().ok().map(|c| (o.id.to_string(), c.to_json())))
        .collect()
}

fn write_chart_files(dir: &Path, outcomes: &[ChartOutcome]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for outcome in outcomes {
        if let Ok(chart) = &outcome.chart {
            let path = dir.join(format!("{}.json", outcome.id));
            fs::write(&path, serde_json::to_string_pretty(chart)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(outcomes: &[ChartOutcome]) {
    eprintln!("{:<30} {:>8} {:>8}", "Chart", "Labels", "Status");
    eprintln!("{}", "-".repeat(48));

    for outcome in outcomes {
        let labels = match &outcome.chart {
            Ok(chart) => chart.data.labels.len().to_string(),
            Err(_) => "-".to_string(),
        };
        eprintln!("{:<30} {:>8} {:>8}", outcome.id, labels, status(outcome));
    }
}

/// Validation failures mean the payload was malformed, not that the API was down
fn status(outcome: &ChartOutcome) -> &'static str {
    match &outcome.chart {
        Ok(_) => "✓",
        Err(e) if e.is_validation() => "invalid",
        Err(_) => "✗",
    }
}
