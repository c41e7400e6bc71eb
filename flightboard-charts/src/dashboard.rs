//! Dashboard assembly: fetch each chart's payload and build its configuration
//!
//! Charts are independent. Every requested chart is fetched and built on its
//! own future, and a failure is reported for that chart alone.

use crate::bucket::BucketSpec;
use crate::builders;
use crate::chart::ChartConfig;
use crate::payload::{
    AirlinePerformance, DailyStat, DelayDistribution, KpiSummary, RevenueAnalysis, RouteStat,
    SatisfactionFactors,
};
use crate::source::{fetch_as, DataSource, Endpoint};
use flightboard_common::{FlightboardError, Result};
use futures::future::join_all;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info};

/// Charts the dashboard knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    Airline,
    Status,
    Delay,
    Routes,
    TimeSeries,
    SatisfactionSeatClass,
    SatisfactionCheckIn,
    SatisfactionTravelPurpose,
    RevenueAirline,
    RevenueClass,
}

impl ChartId {
    pub const ALL: [ChartId; 10] = [
        ChartId::Airline,
        ChartId::Status,
        ChartId::Delay,
        ChartId::Routes,
        ChartId::TimeSeries,
        ChartId::SatisfactionSeatClass,
        ChartId::SatisfactionCheckIn,
        ChartId::SatisfactionTravelPurpose,
        ChartId::RevenueAirline,
        ChartId::RevenueClass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::Airline => "airline",
            ChartId::Status => "status",
            ChartId::Delay => "delay",
            ChartId::Routes => "routes",
            ChartId::TimeSeries => "timeseries",
            ChartId::SatisfactionSeatClass => "satisfaction-seat-class",
            ChartId::SatisfactionCheckIn => "satisfaction-check-in",
            ChartId::SatisfactionTravelPurpose => "satisfaction-travel-purpose",
            ChartId::RevenueAirline => "revenue-airline",
            ChartId::RevenueClass => "revenue-class",
        }
    }

    /// Endpoint whose payload feeds this chart
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ChartId::Airline => Endpoint::AirlinePerformance,
            ChartId::Status => Endpoint::KpiData,
            ChartId::Delay => Endpoint::DelayDistribution,
            ChartId::Routes => Endpoint::RouteAnalysis,
            ChartId::TimeSeries => Endpoint::TimeSeries,
            ChartId::SatisfactionSeatClass
            | ChartId::SatisfactionCheckIn
            | ChartId::SatisfactionTravelPurpose => Endpoint::SatisfactionFactors,
            ChartId::RevenueAirline | ChartId::RevenueClass => Endpoint::RevenueAnalysis,
        }
    }

    /// Parse a list of chart ids; an empty list selects every chart
    pub fn parse_list<S: AsRef<str>>(ids: &[S]) -> Result<Vec<ChartId>> {
        if ids.is_empty() {
            return Ok(Self::ALL.to_vec());
        }
        ids.iter().map(|id| id.as_ref().parse()).collect()
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChartId {
    type Err = FlightboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FlightboardError::Config(format!("unknown chart id: {}", s)))
    }
}

/// Result of building one chart
#[derive(Debug)]
pub struct ChartOutcome {
    pub id: ChartId,
    pub chart: Result<ChartConfig>,
}

impl ChartOutcome {
    pub fn is_ok(&self) -> bool {
        self.chart.is_ok()
    }
}

/// Fetch the payload for `id` from `source` and build its chart
pub async fn build_chart<S>(source: &S, id: ChartId, delay_spec: &BucketSpec) -> Result<ChartConfig>
where
    S: DataSource + ?Sized,
{
    let endpoint = id.endpoint();
    let chart = match id {
        ChartId::Airline => {
            let records: Vec<AirlinePerformance> = fetch_as(source, endpoint).await?;
            builders::airline_performance_chart(&records)
        }
        ChartId::Status => {
            let kpi: KpiSummary = fetch_as(source, endpoint).await?;
            builders::flight_status_chart(&kpi)
        }
        ChartId::Delay => {
            let distribution: DelayDistribution = fetch_as(source, endpoint).await?;
            builders::delay_distribution_chart(&distribution, delay_spec)?
        }
        ChartId::Routes => {
            let routes: Vec<RouteStat> = fetch_as(source, endpoint).await?;
            builders::route_chart(&routes)
        }
        ChartId::TimeSeries => {
            let days: Vec<DailyStat> = fetch_as(source, endpoint).await?;
            builders::time_series_chart(&days)
        }
        ChartId::SatisfactionSeatClass => {
            let factors: SatisfactionFactors = fetch_as(source, endpoint).await?;
            builders::satisfaction_factor_chart("Seat Class", &factors.seat_class)
        }
        ChartId::SatisfactionCheckIn => {
            let factors: SatisfactionFactors = fetch_as(source, endpoint).await?;
            builders::satisfaction_factor_chart("Check-in Method", &factors.check_in)
        }
        ChartId::SatisfactionTravelPurpose => {
            let factors: SatisfactionFactors = fetch_as(source, endpoint).await?;
            builders::satisfaction_factor_chart("Travel Purpose", &factors.travel_purpose)
        }
        ChartId::RevenueAirline => {
            let revenue: RevenueAnalysis = fetch_as(source, endpoint).await?;
            builders::revenue_by_airline_chart(&revenue)
        }
        ChartId::RevenueClass => {
            let revenue: RevenueAnalysis = fetch_as(source, endpoint).await?;
            builders::revenue_by_class_chart(&revenue)
        }
    };

    debug!(chart = %id, labels = chart.data.labels.len(), "chart built");
    Ok(chart)
}

/// Build every chart in `ids` concurrently. Outcomes keep the order of `ids`.
pub async fn build_dashboard<S>(source: &S, delay_spec: &BucketSpec, ids: &[ChartId]) -> Vec<ChartOutcome>
where
    S: DataSource + ?Sized,
{
    let outcomes = join_all(ids.iter().map(|&id| async move {
        ChartOutcome {
            id,
            chart: build_chart(source, id, delay_spec).await,
        }
    }))
    .await;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    for outcome in &outcomes {
        if let Err(e) = &outcome.chart {
            error!(chart = %outcome.id, endpoint = %outcome.id.endpoint(), "failed to build chart: {}", e);
        }
    }
    info!(built = outcomes.len() - failed, failed, "dashboard assembled");

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flightboard_common::BucketError;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// In-memory source; endpoints without a body fail with an HTTP error
    struct FixtureSource {
        bodies: HashMap<Endpoint, Value>,
    }

    #[async_trait]
    impl DataSource for FixtureSource {
        async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
            self.bodies
                .get(&endpoint)
                .cloned()
                .ok_or_else(|| FlightboardError::Http(format!("404 for {}", endpoint)))
        }
    }

    fn fixture() -> FixtureSource {
        let mut bodies = HashMap::new();
        bodies.insert(
            Endpoint::DelayDistribution,
            json!({"delay_minutes": [5, 20, 44.9, 45, 200], "count": [3, 1, 2, 4, 10]}),
        );
        bodies.insert(
            Endpoint::SatisfactionFactors,
            json!({
                "seat_class": {"Economy": 2.9, "Business": 4.2},
                "check_in": {"Online": 3.4, "Counter": 3.0},
                "travel_purpose": {"Business": 3.3, "Leisure": 3.7}
            }),
        );
        bodies.insert(
            Endpoint::RouteAnalysis,
            json!([{"Departure_Airport": "SFO", "Arrival_Airport": "SEA", "Flight_ID": 8, "Price_USD": 150.0, "Delay_Minutes": 5.0}]),
        );
        FixtureSource { bodies }
    }

    #[test]
    fn test_chart_id_round_trip() {
        for id in ChartId::ALL {
            assert_eq!(id.as_str().parse::<ChartId>().unwrap(), id);
        }
        assert!("pie".parse::<ChartId>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let all = ChartId::parse_list::<&str>(&[]).unwrap();
        assert_eq!(all.len(), ChartId::ALL.len());

        let picked = ChartId::parse_list(&["delay", "routes"]).unwrap();
        assert_eq!(picked, vec![ChartId::Delay, ChartId::Routes]);

        assert!(ChartId::parse_list(&["delay", "nope"]).is_err());
    }

    #[tokio::test]
    async fn test_build_delay_chart_from_source() {
        let chart = build_chart(&fixture(), ChartId::Delay, &BucketSpec::delay_minutes())
            .await
            .unwrap();
        assert_eq!(chart.data.datasets[0].data, vec![3.0, 1.0, 2.0, 4.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_satisfaction_factor_charts_share_endpoint() {
        let source = fixture();
        let spec = BucketSpec::delay_minutes();
        let check_in = build_chart(&source, ChartId::SatisfactionCheckIn, &spec).await.unwrap();
        assert_eq!(check_in.data.labels, vec!["Counter", "Online"]);

        let purpose = build_chart(&source, ChartId::SatisfactionTravelPurpose, &spec)
            .await
            .unwrap();
        assert_eq!(purpose.data.datasets[0].data, vec![3.3, 3.7]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let ids = [ChartId::Airline, ChartId::Delay, ChartId::Routes];
        let outcomes = build_dashboard(&fixture(), &BucketSpec::delay_minutes(), &ids).await;

        assert_eq!(outcomes.iter().map(|o| o.id).collect::<Vec<_>>(), ids.to_vec());
        assert!(matches!(outcomes[0].chart, Err(FlightboardError::Http(_))));
        assert!(outcomes[1].is_ok());
        assert!(outcomes[2].is_ok());
    }

    #[tokio::test]
    async fn test_validation_error_surfaces_instead_of_empty_chart() {
        let mut source = fixture();
        source.bodies.insert(
            Endpoint::DelayDistribution,
            json!({"delay_minutes": [5, 20], "count": [3]}),
        );

        let outcomes =
            build_dashboard(&source, &BucketSpec::delay_minutes(), &[ChartId::Delay]).await;
        match &outcomes[0].chart {
            Err(FlightboardError::Bucket(BucketError::ShapeMismatch { .. })) => {}
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let source: Box<dyn DataSource> = Box::new(fixture());
        let outcomes =
            build_dashboard(source.as_ref(), &BucketSpec::delay_minutes(), &[ChartId::Routes]).await;
        assert!(outcomes[0].is_ok());
    }
}
