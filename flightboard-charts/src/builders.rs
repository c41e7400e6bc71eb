//! Mapping of endpoint payloads onto chart configurations
//!
//! One function per chart. None of them touch the network; the dashboard
//! module pairs each builder with the endpoint that feeds it.

use crate::bucket::BucketSpec;
use crate::chart::{palette, ChartConfig, ChartKind, Dataset, Position, Scale};
use crate::payload::{
    AirlinePerformance, DailyStat, DelayDistribution, KpiSummary, RevenueAnalysis, RouteStat,
};
use flightboard_common::BucketError;
use std::collections::BTreeMap;
use tracing::debug;

/// Satisfaction (left axis) and delay (right axis) per airline
pub fn airline_performance_chart(records: &[AirlinePerformance]) -> ChartConfig {
    ChartConfig::builder(ChartKind::Bar)
        .labels(records.iter().map(|r| r.airline.clone()))
        .dataset(
            Dataset::new(
                "Avg Satisfaction",
                records.iter().map(|r| r.avg_satisfaction).collect(),
            )
            .color(palette::BLUE)
            .axis("y"),
        )
        .dataset(
            Dataset::new("Avg Delay (min)", records.iter().map(|r| r.avg_delay).collect())
                .color(palette::RED)
                .axis("y1"),
        )
        .index_interaction()
        .scale("y", Scale::linear(Position::Left, "Satisfaction Score"))
        .scale(
            "y1",
            Scale::linear(Position::Right, "Delay (minutes)").without_grid(),
        )
        .build()
}

/// On-time / delayed / cancelled split. Delayed is whatever share remains.
pub fn flight_status_chart(kpi: &KpiSummary) -> ChartConfig {
    ChartConfig::builder(ChartKind::Doughnut)
        .labels(["On-Time", "Delayed", "Cancelled"])
        .dataset(
            Dataset::unlabeled(vec![
                kpi.on_time_rate,
                kpi.delayed_rate(),
                kpi.cancellation_rate,
            ])
            .per_point_colors(),
        )
        .legend_position(Position::Bottom)
        .build()
}

/// Histogram of delayed flights, bucketed by `spec`
pub fn delay_distribution_chart(
    distribution: &DelayDistribution,
    spec: &BucketSpec,
) -> Result<ChartConfig, BucketError> {
    let result = spec.aggregate(distribution.observations()?);
    if result.dropped > 0 {
        debug!(
            dropped = result.dropped,
            total = distribution.total_count(),
            "delays outside the histogram range left out of the chart"
        );
    }

    Ok(ChartConfig::builder(ChartKind::Bar)
        .labels(result.labels())
        .dataset(
            Dataset::new(
                "Number of Flights",
                result.totals().into_iter().map(|t| t as f64).collect(),
            )
            .color(palette::ORANGE),
        )
        .scale("y", Scale::titled("Number of Flights").begin_at_zero())
        .scale("x", Scale::titled("Delay Duration (minutes)"))
        .build())
}

/// Busiest routes as horizontal bars
pub fn route_chart(routes: &[RouteStat]) -> ChartConfig {
    ChartConfig::builder(ChartKind::Bar)
        .horizontal()
        .labels(routes.iter().map(RouteStat::label))
        .dataset(
            Dataset::new(
                "Number of Flights",
                routes.iter().map(|r| r.flights as f64).collect(),
            )
            .color(palette::PURPLE),
        )
        .scale("x", Scale::titled("Number of Flights").begin_at_zero())
        .hide_legend()
        .build()
}

/// Daily flight volume and satisfaction on separate axes
pub fn time_series_chart(days: &[DailyStat]) -> ChartConfig {
    ChartConfig::builder(ChartKind::Line)
        .labels(days.iter().map(|d| d.date.format("%Y-%m-%d").to_string()))
        .dataset(
            Dataset::new("Daily Flights", days.iter().map(|d| d.flights as f64).collect())
                .stroke(palette::TEAL)
                .tension(0.4)
                .axis("y"),
        )
        .dataset(
            Dataset::new(
                "Avg Satisfaction",
                days.iter().map(|d| d.avg_satisfaction).collect(),
            )
            .stroke(palette::BLUE)
            .tension(0.4)
            .axis("y1"),
        )
        .index_interaction()
        .scale("x", Scale::titled("Date").max_ticks(15))
        .scale("y", Scale::linear(Position::Left, "Number of Flights"))
        .scale(
            "y1",
            Scale::linear(Position::Right, "Satisfaction Score").without_grid(),
        )
        .build()
}

/// Mean satisfaction per category of one factor (seat class, check-in, ...)
pub fn satisfaction_factor_chart(title: &str, scores: &BTreeMap<String, f64>) -> ChartConfig {
    ChartConfig::builder(ChartKind::Bar)
        .labels(scores.keys().cloned())
        .dataset(Dataset::new(title, scores.values().copied().collect()).color(palette::TEAL))
        .scale("y", Scale::titled("Satisfaction Score").begin_at_zero())
        .build()
}

pub fn revenue_by_airline_chart(revenue: &RevenueAnalysis) -> ChartConfig {
    ChartConfig::builder(ChartKind::Bar)
        .labels(revenue.by_airline.keys().cloned())
        .dataset(
            Dataset::new("Revenue (USD)", revenue.by_airline.values().copied().collect())
                .color(palette::YELLOW),
        )
        .scale("y", Scale::titled("Revenue (USD)").begin_at_zero())
        .hide_legend()
        .build()
}

pub fn revenue_by_class_chart(revenue: &RevenueAnalysis) -> ChartConfig {
    ChartConfig::builder(ChartKind::Doughnut)
        .labels(revenue.by_class.keys().cloned())
        .dataset(Dataset::unlabeled(revenue.by_class.values().copied().collect()).per_point_colors())
        .legend_position(Position::Bottom)
        .build()
}
