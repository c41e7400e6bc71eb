//! End-to-end tests: a fake analytics API served over HTTP, consumed by the
//! HTTP data source and turned into a full set of chart configurations.

use anyhow::Result;
use axum::{routing::get, Json, Router};
use flightboard::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

fn analytics_api() -> Router {
    Router::new()
        .route(
            "/api/airline-performance",
            get(|| async {
                Json(json!([
                    {"Airline": "Alaska", "Avg_Satisfaction": 3.9, "Avg_Delay": 11.2, "Avg_Price": 240.0, "Total_Flights": 51},
                    {"Airline": "Delta", "Avg_Satisfaction": 3.4, "Avg_Delay": 18.7, "Avg_Price": 310.5, "Total_Flights": 88}
                ]))
            }),
        )
        .route(
            "/api/kpi-data",
            get(|| async {
                Json(json!({
                    "total_flights": 139, "on_time_rate": 64.2, "avg_delay": 41.3,
                    "avg_satisfaction": 3.6, "total_revenue": 38112.5, "cancellation_rate": 6.1,
                    "no_show_rate": 3.0, "avg_age": 39.4, "male_ratio": 49.6, "avg_duration": 201.0,
                    "avg_distance": 1402.2, "avg_price": 274.2, "most_popular_airline": "Delta"
                }))
            }),
        )
        .route(
            "/api/delay-distribution",
            get(|| async {
                Json(json!({"delay_minutes": [0, 14, 15, 59, 60, 179, 180, 240], "count": [4, 6, 2, 3, 1, 5, 7, 2]}))
            }),
        )
        .route(
            "/api/route-analysis",
            get(|| async {
                Json(json!([
                    {"Departure_Airport": "JFK", "Arrival_Airport": "LAX", "Flight_ID": 12, "Price_USD": 350.0, "Delay_Minutes": 22.0, "Route": "JFK → LAX"},
                    {"Departure_Airport": "ORD", "Arrival_Airport": "DFW", "Flight_ID": 9, "Price_USD": 180.0, "Delay_Minutes": 14.0}
                ]))
            }),
        )
        .route(
            "/api/time-series",
            get(|| async {
                Json(json!([
                    {"Date": "2024-05-01", "Flight_ID": 40, "Delay_Minutes": 20.0, "Flight_Satisfaction_Score": 3.5},
                    {"Date": "2024-05-02", "Flight_ID": 44, "Delay_Minutes": 25.5, "Flight_Satisfaction_Score": 3.2},
                    {"Date": "2024-05-03", "Flight_ID": 55, "Delay_Minutes": 12.0, "Flight_Satisfaction_Score": 3.9}
                ]))
            }),
        )
        .route(
            "/api/satisfaction-factors",
            get(|| async {
                Json(json!({
                    "seat_class": {"Business": 4.1, "Economy": 3.0, "First": 4.5},
                    "check_in": {"Counter": 3.1, "Mobile": 3.6, "Online": 3.5},
                    "travel_purpose": {"Business": 3.4, "Leisure": 3.8}
                }))
            }),
        )
        .route(
            "/api/revenue-analysis",
            get(|| async {
                Json(json!({
                    "by_airline": {"Alaska": 12240.0, "Delta": 25872.5},
                    "by_class": {"Business": 15000.0, "Economy": 18112.5, "First": 5000.0}
                }))
            }),
        )
}

async fn serve(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn builds_every_chart_from_http_api() -> Result<()> {
    let base = serve(analytics_api()).await?;
    let source = HttpDataSource::new(&base, Duration::from_secs(5))?;

    let outcomes = build_dashboard(&source, &BucketSpec::delay_minutes(), &ChartId::ALL).await;
    assert_eq!(outcomes.len(), ChartId::ALL.len());
    for outcome in &outcomes {
        assert!(outcome.is_ok(), "{} failed: {:?}", outcome.id, outcome.chart);
        let chart = outcome.chart.as_ref().unwrap();
        for dataset in &chart.data.datasets {
            assert_eq!(dataset.data.len(), chart.data.labels.len(), "{}", outcome.id);
        }
    }
    Ok(())
}

#[tokio::test]
async fn delay_chart_drops_values_outside_histogram() -> Result<()> {
    let base = serve(analytics_api()).await?;
    let source = HttpDataSource::new(&base, Duration::from_secs(5))?;

    let chart = build_chart(&source, ChartId::Delay, &BucketSpec::delay_minutes()).await?;
    let value: Value = chart.to_json();

    // 0 and 14 -> 0-15; 15 -> 15-30; 59 -> 45-60; 60 -> 60-90; 179 -> 120-180;
    // 180 and 240 are past the last edge and left out
    assert_eq!(
        value["data"]["datasets"][0]["data"],
        json!([10.0, 2.0, 0.0, 3.0, 1.0, 0.0, 5.0])
    );
    assert_eq!(value["type"], "bar");
    Ok(())
}

#[tokio::test]
async fn status_and_route_charts_match_payloads() -> Result<()> {
    let base = serve(analytics_api()).await?;
    let source = HttpDataSource::new(&base, Duration::from_secs(5))?;
    let spec = BucketSpec::delay_minutes();

    let status = build_chart(&source, ChartId::Status, &spec).await?;
    assert_eq!(status.kind, ChartKind::Doughnut);
    let data = &status.data.datasets[0].data;
    assert!((data.iter().sum::<f64>() - 100.0).abs() < 1e-9);

    let routes = build_chart(&source, ChartId::Routes, &spec).await?;
    assert_eq!(routes.data.labels, vec!["JFK → LAX", "ORD → DFW"]);
    Ok(())
}

#[tokio::test]
async fn unreachable_api_fails_every_chart() -> Result<()> {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let source = HttpDataSource::new(&format!("http://{}", addr), Duration::from_secs(2))?;
    let outcomes = build_dashboard(
        &source,
        &BucketSpec::delay_minutes(),
        &[ChartId::Delay, ChartId::Airline],
    )
    .await;

    assert!(outcomes.iter().all(|o| !o.is_ok()));
    assert!(outcomes
        .iter()
        .all(|o| matches!(o.chart, Err(FlightboardError::Http(_)) | Err(FlightboardError::Timeout))));
    Ok(())
}

#[test]
fn aggregate_is_reachable_through_facade() {
    let labels = ["0-15", "15-30", "30-45", "45-60", "60-90", "90-120", "120-180"];
    let result = aggregate(
        &[5.0, 20.0, 44.9, 45.0, 200.0],
        &[3, 1, 2, 4, 10],
        flightboard::common::DEFAULT_DELAY_BOUNDARIES,
        &labels,
    )
    .unwrap();
    assert_eq!(result.totals(), vec![3, 1, 2, 4, 0, 0, 0]);
    assert_eq!(result.dropped, 10);

    let err = aggregate(&[1.0], &[1], &[0.0], &[] as &[&str]).unwrap_err();
    assert!(matches!(err, BucketError::InvalidBucketSpec(_)));
}
