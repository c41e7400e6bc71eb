//! Flightboard - airline performance dashboard charts
//!
//! Facade over the workspace crates: shared configuration and errors, and
//! the chart builders with their delay histogram bucketing.

pub use flightboard_charts as charts;
pub use flightboard_common as common;

/// Re-export common types and utilities
pub mod prelude {
    pub use crate::charts::{
        aggregate, build_chart, build_dashboard, BucketResult, BucketSpec, ChartConfig, ChartId,
        ChartKind, ChartOutcome, DataSource, Endpoint, HttpDataSource, Observation,
    };
    pub use crate::common::{BucketError, DashboardConfig, FlightboardError, Result};
}
