//! Response bodies of the analytics API endpoints

use crate::bucket::Observation;
use chrono::NaiveDate;
use flightboard_common::BucketError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-airline averages from `/api/airline-performance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlinePerformance {
    #[serde(rename = "Airline")]
    pub airline: String,
    #[serde(rename = "Avg_Satisfaction")]
    pub avg_satisfaction: f64,
    #[serde(rename = "Avg_Delay")]
    pub avg_delay: f64,
    #[serde(rename = "Avg_Price")]
    pub avg_price: f64,
    #[serde(rename = "Total_Flights")]
    pub total_flights: u64,
}

/// Headline figures from `/api/kpi-data`. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_flights: u64,
    pub on_time_rate: f64,
    pub avg_delay: f64,
    pub avg_satisfaction: f64,
    pub total_revenue: f64,
    pub cancellation_rate: f64,
    pub no_show_rate: f64,
    pub avg_age: f64,
    pub male_ratio: f64,
    pub avg_duration: f64,
    pub avg_distance: f64,
    pub avg_price: f64,
    pub most_popular_airline: String,
}

impl KpiSummary {
    /// Share of flights neither on time nor cancelled
    pub fn delayed_rate(&self) -> f64 {
        100.0 - self.on_time_rate - self.cancellation_rate
    }
}

/// Delay value counts from `/api/delay-distribution`, as parallel arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayDistribution {
    pub delay_minutes: Vec<f64>,
    pub count: Vec<u64>,
}

impl DelayDistribution {
    /// Pair each delay value with its count
    pub fn observations(&self) -> Result<Vec<Observation>, BucketError> {
        if self.delay_minutes.len() != self.count.len() {
            return Err(BucketError::ShapeMismatch {
                what: "count",
                expected: self.delay_minutes.len(),
                actual: self.count.len(),
            });
        }

        Ok(self
            .delay_minutes
            .iter()
            .zip(&self.count)
            .map(|(&magnitude, &count)| Observation::new(magnitude, count))
            .collect())
    }

    /// Sum of all counts, saturating at `u64::MAX`
    pub fn total_count(&self) -> u64 {
        self.count.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }
}

/// One of the busiest routes from `/api/route-analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStat {
    #[serde(rename = "Departure_Airport")]
    pub departure_airport: String,
    #[serde(rename = "Arrival_Airport")]
    pub arrival_airport: String,
    /// Number of flights on the route
    #[serde(rename = "Flight_ID")]
    pub flights: u64,
    #[serde(rename = "Price_USD")]
    pub avg_price: f64,
    #[serde(rename = "Delay_Minutes")]
    pub avg_delay: f64,
    #[serde(rename = "Route", default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl RouteStat {
    pub fn label(&self) -> String {
        match &self.route {
            Some(route) if !route.trim().is_empty() => route.clone(),
            _ => format!("{} → {}", self.departure_airport, self.arrival_airport),
        }
    }
}

/// Daily aggregates from `/api/time-series`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Flight_ID")]
    pub flights: u64,
    #[serde(rename = "Delay_Minutes")]
    pub avg_delay: f64,
    #[serde(rename = "Flight_Satisfaction_Score")]
    pub avg_satisfaction: f64,
}

/// Mean satisfaction per category from `/api/satisfaction-factors`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionFactors {
    pub seat_class: BTreeMap<String, f64>,
    pub check_in: BTreeMap<String, f64>,
    pub travel_purpose: BTreeMap<String, f64>,
}

/// Summed ticket revenue from `/api/revenue-analysis`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueAnalysis {
    pub by_airline: BTreeMap<String, f64>,
    pub by_class: BTreeMap<String, f64>,
}
