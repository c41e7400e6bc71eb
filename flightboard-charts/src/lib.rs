//! Chart configurations for the airline performance dashboard
//!
//! This crate turns the analytics API's pre-aggregated JSON into Chart.js
//! configurations. It includes:
//! - Delay histogram bucketing over (value, count) observations
//! - Typed payloads for each API endpoint
//! - Per-chart builders and the dashboard assembly that runs them
//! - An HTTP data source for the API

pub mod bucket;
pub mod builders;
pub mod chart;
pub mod dashboard;
pub mod payload;
pub mod source;

pub use bucket::{aggregate, BucketResult, BucketSpec, BucketTotal, Observation};
pub use chart::{ChartConfig, ChartKind};
pub use dashboard::{build_chart, build_dashboard, ChartId, ChartOutcome};
pub use source::{fetch_as, DataSource, Endpoint, HttpDataSource};
