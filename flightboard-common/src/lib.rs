pub mod config;
pub mod error;

pub use config::{ConfigSource, DashboardConfig, HistogramConfig, load_config, save_config};
pub use error::{BucketError, FlightboardError, Result};

/// Bin edges (minutes) used by the delay distribution chart
pub const DEFAULT_DELAY_BOUNDARIES: &[f64] = &[0.0, 15.0, 30.0, 45.0, 60.0, 90.0, 120.0, 180.0];
