use thiserror::Error;

/// Validation failures raised while bucketing observations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BucketError {
    #[error("shape mismatch: {what} has {actual} entries, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid bucket spec: {0}")]
    InvalidBucketSpec(String),
}

/// Main error type for flightboard
#[derive(Error, Debug)]
pub enum FlightboardError {
    #[error(transparent)]
    Bucket(#[from] BucketError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout error")]
    Timeout,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlightboardError {
    /// Whether the failure came from malformed chart input rather than transport
    pub fn is_validation(&self) -> bool {
        matches!(self, FlightboardError::Bucket(_))
    }
}

impl From<toml::de::Error> for FlightboardError {
    fn from(err: toml::de::Error) -> Self {
        FlightboardError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FlightboardError {
    fn from(err: toml::ser::Error) -> Self {
        FlightboardError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FlightboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = BucketError::ShapeMismatch {
            what: "counts",
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "shape mismatch: counts has 2 entries, expected 3");
    }

    #[test]
    fn test_bucket_error_is_validation() {
        let err: FlightboardError = BucketError::InvalidBucketSpec("empty".into()).into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "invalid bucket spec: empty");
        assert!(!FlightboardError::Timeout.is_validation());
    }
}
