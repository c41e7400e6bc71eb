//! Histogram bucketing for pre-aggregated observations.
//!
//! Observations are `(magnitude, count)` pairs: the data source has already
//! counted how many flights share each delay value, so bucketing sums counts
//! rather than counting events. Buckets are half-open `[lo, hi)` intervals
//! described by a strictly increasing list of boundaries. A magnitude equal
//! to an interior boundary belongs to the bucket that boundary opens.
//! Magnitudes outside `[first, last)` fall in no bucket and are left out of
//! every total; they are reported separately as dropped mass, never clamped
//! into an edge bucket.
//!
//! Totals saturate at `u64::MAX` instead of overflowing.

use flightboard_common::{BucketError, HistogramConfig, DEFAULT_DELAY_BOUNDARIES};
use serde::{Deserialize, Serialize};

/// A magnitude and how many times it was observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub magnitude: f64,
    pub count: u64,
}

impl Observation {
    pub fn new(magnitude: f64, count: u64) -> Self {
        Self { magnitude, count }
    }
}

impl From<(f64, u64)> for Observation {
    fn from((magnitude, count): (f64, u64)) -> Self {
        Self::new(magnitude, count)
    }
}

/// Validated bucket layout: N+1 strictly increasing boundaries, N labels
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSpec {
    boundaries: Vec<f64>,
    labels: Vec<String>,
}

impl BucketSpec {
    pub fn new<S: Into<String>>(
        boundaries: Vec<f64>,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, BucketError> {
        validate_boundaries(&boundaries)?;

        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != boundaries.len() - 1 {
            return Err(BucketError::ShapeMismatch {
                what: "labels",
                expected: boundaries.len() - 1,
                actual: labels.len(),
            });
        }

        Ok(Self { boundaries, labels })
    }

    /// Build a spec whose labels are the "lo-hi" ranges of each bucket
    pub fn with_range_labels(boundaries: Vec<f64>) -> Result<Self, BucketError> {
        validate_boundaries(&boundaries)?;
        let labels = range_labels(&boundaries);
        Ok(Self { boundaries, labels })
    }

    /// Delay bins used by the dashboard: 0-15 through 120-180 minutes
    pub fn delay_minutes() -> Self {
        let boundaries = DEFAULT_DELAY_BOUNDARIES.to_vec();
        let labels = range_labels(&boundaries);
        Self { boundaries, labels }
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the bucket containing `magnitude`, if any.
    ///
    /// Boundaries are strictly increasing, so the number of boundaries
    /// `<= magnitude` identifies the bucket directly. NaN compares false
    /// against every boundary and therefore lands nowhere.
    pub fn bucket_for(&self, magnitude: f64) -> Option<usize> {
        let upper = self.boundaries.partition_point(|b| *b <= magnitude);
        if upper == 0 || upper == self.boundaries.len() {
            None
        } else {
            Some(upper - 1)
        }
    }

    /// Sum observation counts into this spec's buckets
    pub fn aggregate<I>(&self, observations: I) -> BucketResult
    where
        I: IntoIterator,
        I::Item: Into<Observation>,
    {
        let mut totals = vec![0u64; self.len()];
        let mut dropped = 0u64;

        for observation in observations {
            let observation: Observation = observation.into();
            match self.bucket_for(observation.magnitude) {
                Some(idx) => totals[idx] = totals[idx].saturating_add(observation.count),
                None => dropped = dropped.saturating_add(observation.count),
            }
        }

        BucketResult {
            buckets: self
                .labels
                .iter()
                .cloned()
                .zip(totals)
                .map(|(label, total)| BucketTotal { label, total })
                .collect(),
            dropped,
        }
    }
}

impl TryFrom<&HistogramConfig> for BucketSpec {
    type Error = BucketError;

    fn try_from(config: &HistogramConfig) -> Result<Self, Self::Error> {
        match &config.labels {
            Some(labels) => Self::new(config.boundaries.clone(), labels.iter().cloned()),
            None => Self::with_range_labels(config.boundaries.clone()),
        }
    }
}

fn range_labels(boundaries: &[f64]) -> Vec<String> {
    boundaries
        .windows(2)
        .map(|w| format!("{}-{}", w[0], w[1]))
        .collect()
}

fn validate_boundaries(boundaries: &[f64]) -> Result<(), BucketError> {
    if boundaries.len() < 2 {
        return Err(BucketError::InvalidBucketSpec(format!(
            "need at least 2 boundaries, got {}",
            boundaries.len()
        )));
    }

    // `!(a < b)` also rejects NaN
    if let Some(pos) = boundaries.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(BucketError::InvalidBucketSpec(format!(
            "boundaries must be strictly increasing: {} at index {} is followed by {}",
            boundaries[pos],
            pos,
            boundaries[pos + 1]
        )));
    }

    Ok(())
}

/// Total count for one labeled bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotal {
    pub label: String,
    pub total: u64,
}

/// Per-bucket totals in bucket order, plus the mass that fell outside every bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketResult {
    pub buckets: Vec<BucketTotal>,
    pub dropped: u64,
}

impl BucketResult {
    /// Sum of all bucket totals, excluding dropped mass. Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.total))
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.label.clone()).collect()
    }

    pub fn totals(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.total).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|b| (b.label.as_str(), b.total))
    }
}

/// Bucket parallel `magnitudes`/`counts` arrays into the buckets described
/// by `boundaries` and `labels`.
///
/// Fails with [`BucketError::ShapeMismatch`] when `counts` and `magnitudes`
/// differ in length or when `labels` does not have one entry per bucket, and
/// with [`BucketError::InvalidBucketSpec`] when `boundaries` has fewer than
/// two entries or is not strictly increasing.
pub fn aggregate<S: AsRef<str>>(
    magnitudes: &[f64],
    counts: &[u64],
    boundaries: &[f64],
    labels: &[S],
) -> Result<BucketResult, BucketError> {
    if magnitudes.len() != counts.len() {
        return Err(BucketError::ShapeMismatch {
            what: "counts",
            expected: magnitudes.len(),
            actual: counts.len(),
        });
    }

    let spec = BucketSpec::new(boundaries.to_vec(), labels.iter().map(|l| l.as_ref()))?;
    Ok(spec.aggregate(magnitudes.iter().copied().zip(counts.iter().copied())))
}
