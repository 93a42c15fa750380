//! Aggregate throughput statistics over a sample set.

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Max, mean and min throughput over the valid samples of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSummary {
    /// Largest observed throughput (MB/s).
    pub max: f64,
    /// Arithmetic mean throughput (MB/s).
    pub mean: f64,
    /// Smallest observed throughput (MB/s).
    pub min: f64,
    /// Number of samples aggregated.
    pub count: usize,
}

impl ThroughputSummary {
    /// Whether every aggregated throughput is numerically identical.
    pub fn is_uniform(&self) -> bool {
        self.min == self.max
    }
}

/// Summarize the valid samples, skipping any with zero duration or
/// non-finite throughput.
///
/// Returns `None` if no valid sample exists.
pub fn summarize(samples: &[Sample]) -> Option<ThroughputSummary> {
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for sample in samples.iter().filter(|s| s.is_valid()) {
        max = max.max(sample.throughput);
        min = min.min(sample.throughput);
        sum += sample.throughput;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(ThroughputSummary {
        max,
        mean: sum / count as f64,
        min,
        count,
    })
}
