//! Where chart payloads come from

use async_trait::async_trait;
use flightboard_common::{DashboardConfig, FlightboardError, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Analytics API endpoints consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    AirlinePerformance,
    KpiData,
    DelayDistribution,
    RouteAnalysis,
    TimeSeries,
    SatisfactionFactors,
    RevenueAnalysis,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AirlinePerformance => "/api/airline-performance",
            Endpoint::KpiData => "/api/kpi-data",
            Endpoint::DelayDistribution => "/api/delay-distribution",
            Endpoint::RouteAnalysis => "/api/route-analysis",
            Endpoint::TimeSeries => "/api/time-series",
            Endpoint::SatisfactionFactors => "/api/satisfaction-factors",
            Endpoint::RevenueAnalysis => "/api/revenue-analysis",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

/// Supplier of raw endpoint bodies
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<serde_json::Value>;
}

/// Fetch an endpoint and decode its body
pub async fn fetch_as<T, S>(source: &S, endpoint: Endpoint) -> Result<T>
where
    T: DeserializeOwned,
    S: DataSource + ?Sized,
{
    let body = source.fetch(endpoint).await?;
    Ok(serde_json::from_value(body)?)
}

/// [`DataSource`] issuing HTTP GET requests against the analytics API
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpDataSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| FlightboardError::Config(format!("invalid base_url {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FlightboardError::Config(format!(
                "base_url {} cannot be used as a base",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FlightboardError::Http(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Absolute URL of an endpoint; any path prefix on the base URL is kept
    pub fn url(&self, endpoint: Endpoint) -> reqwest::Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", prefix, endpoint.path()));
        url
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<serde_json::Value> {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?;

        response.json().await.map_err(http_error)
    }
}

fn http_error(err: reqwest::Error) -> FlightboardError {
    if err.is_timeout() {
        FlightboardError::Timeout
    } else if err.is_decode() {
        FlightboardError::Http(format!("malformed response body: {}", err))
    } else {
        FlightboardError::Http(err.to_string())
    }
}
