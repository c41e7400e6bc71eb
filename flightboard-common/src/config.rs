//! Configuration management for flightboard

use crate::error::{FlightboardError, Result};
use crate::DEFAULT_DELAY_BOUNDARIES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding [`DashboardConfig::base_url`]
pub const ENV_BASE_URL: &str = "FLIGHTBOARD_BASE_URL";
/// Environment variable overriding [`DashboardConfig::request_timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "FLIGHTBOARD_TIMEOUT_SECS";
/// Environment variable overriding [`DashboardConfig::output_dir`]
pub const ENV_OUTPUT_DIR: &str = "FLIGHTBOARD_OUTPUT_DIR";

/// Bin layout for the delay distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Strictly increasing bin edges; N edges make N-1 half-open bins
    pub boundaries: Vec<f64>,
    /// One label per bin. Derived as "lo-hi" from the edges when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            boundaries: DEFAULT_DELAY_BOUNDARIES.to_vec(),
            labels: None,
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the analytics API serving the /api/* endpoints
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Where chart configurations are written
    pub output_dir: PathBuf,
    /// Chart ids to build; empty means every chart
    pub charts: Vec<String>,
    pub delay_histogram: HistogramConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:5000"),
            request_timeout_secs: 30,
            output_dir: PathBuf::from("./charts"),
            charts: Vec::new(),
            delay_histogram: HistogramConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `FLIGHTBOARD_*` overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            debug!("base_url overridden from {}", ENV_BASE_URL);
            self.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => warn!("ignoring {}={:?}: not a number of seconds", ENV_TIMEOUT_SECS, timeout),
            }
        }

        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Check settings that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(FlightboardError::Config("base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(FlightboardError::Config("request_timeout_secs must be positive".into()));
        }
        if self.delay_histogram.boundaries.len() < 2 {
            return Err(FlightboardError::Config(
                "delay_histogram needs at least two boundaries".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration source for loading dashboard settings
pub enum ConfigSource {
    File(PathBuf),
    Default,
    Environment,
}

/// Load dashboard configuration from various sources
pub fn load_config(source: ConfigSource) -> Result<DashboardConfig> {
    match source {
        ConfigSource::File(path) => DashboardConfig::from_file(&path),
        ConfigSource::Default => Ok(DashboardConfig::default()),
        ConfigSource::Environment => {
            let mut config = DashboardConfig::default();
            config.apply_env();
            Ok(config)
        }
    }
}

/// Save dashboard configuration to file
pub fn save_config(config: &DashboardConfig, path: &Path) -> Result<()> {
    config.to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delay_histogram.boundaries.len(), 8);
        assert!(config.delay_histogram.labels.is_none());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("flightboard.toml");

        let mut config = DashboardConfig::default();
        config.base_url = "http://analytics.internal:8080".to_string();
        config.charts = vec!["delay".to_string(), "routes".to_string()];
        config.delay_histogram.labels = Some(vec!["a".into(); 7]);

        save_config(&config, &path).unwrap();
        let loaded = load_config(ConfigSource::File(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "base_url = \"http://example.com\"\n").unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.delay_histogram, HistogramConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"\n").unwrap();

        let err = DashboardConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FlightboardError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://10.0.0.1:5000"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_OUTPUT_DIR, "/tmp/charts"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://10.0.0.1:5000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/charts"));
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "never".to_string()));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = DashboardConfig::default();
        config.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.delay_histogram.boundaries = vec![0.0];
        assert!(config.validate().is_err());
    }
}
