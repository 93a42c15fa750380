//! Result types for an alignment probe run.

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::statistics::ThroughputSummary;
use crate::types::{Sample, SECTOR_SIZE};

/// Classification of one sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Label {
    /// Throughput strictly closer to the maximum than to the mean.
    Good,
    /// Throughput at least as close to the mean as to the maximum.
    Bad,
    /// Zero duration or non-finite throughput; excluded from aggregates.
    Invalid,
}

impl Label {
    /// Whether this is a good sample.
    pub fn is_good(self) -> bool {
        matches!(self, Label::Good)
    }
}

/// Shape of the sample set the verdict was derived from.
///
/// Anything other than `Normal` forces a "not aligned" verdict with a
/// recommended offset of 0, because the max-versus-mean rule cannot single
/// out a fast offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    /// At least two distinct valid throughputs.
    Normal,
    /// Exactly one valid sample: max equals mean.
    SingleSample,
    /// Two or more valid samples, all with identical throughput.
    /// Indistinguishable from a uniformly misaligned device.
    UniformThroughput,
    /// No sample had a measurable duration.
    NoValidSamples,
}

impl Condition {
    /// Whether classification could discriminate between offsets.
    pub fn is_normal(self) -> bool {
        matches!(self, Condition::Normal)
    }

    /// Human-readable explanation for degenerate conditions.
    pub fn note(self) -> Option<&'static str> {
        match self {
            Condition::Normal => None,
            Condition::SingleSample => Some(
                "only one offset was measured; a single sample can never be classified as good",
            ),
            Condition::UniformThroughput => Some(
                "all offsets measured identical throughput; uniform and uniformly misaligned look the same",
            ),
            Condition::NoValidSamples => Some(
                "no trial took measurable time; increase the repeat count",
            ),
        }
    }
}

/// Aligned/misaligned decision derived from the full sample set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the sample at base offset 0 is good.
    pub is_aligned: bool,
    /// Base offset of the first good sample, or 0 if none.
    pub recommended_offset: u64,
    /// Shape of the sample set.
    pub condition: Condition,
}

impl Verdict {
    /// Recommended offset expressed in 512-byte sectors.
    pub fn recommended_sectors(&self) -> u64 {
        self.recommended_offset / SECTOR_SIZE
    }

    /// Process exit status convention: 0 when aligned, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_aligned {
            0
        } else {
            1
        }
    }
}

/// Everything the classifier derives from a sample set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// One label per input sample, same order.
    pub labels: Vec<Label>,
    /// Aggregates over valid samples; `None` if there were none.
    pub summary: Option<ThroughputSummary>,
    /// Final decision.
    pub verdict: Verdict,
}

/// Reliability notes attached to a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Diagnostics {
    /// Samples excluded for zero duration or non-finite throughput.
    pub invalid_samples: usize,
    /// Estimated clock resolution in nanoseconds, if a tick was observed.
    pub clock_resolution_ns: Option<f64>,
    /// Human-readable warnings (empty if nothing looked off).
    pub warnings: Vec<String>,
}

impl Diagnostics {
    /// Whether any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Metadata for debugging and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// Device or file that was probed, if known.
    pub device: Option<String>,
    /// Device length in bytes, if it could be determined.
    pub device_len: Option<u64>,
    /// Clock used to time trials.
    pub clock: String,
    /// Wall-clock seconds for the whole sweep.
    pub runtime_secs: f64,
}

/// One table row: a sample with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// The measurement.
    pub sample: Sample,
    /// Its classification.
    pub label: Label,
}

/// Complete result of a successful probe run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    /// Configuration the run used (interval already clamped).
    pub config: RunConfig,
    /// Samples in ascending base-offset order.
    pub samples: Vec<Sample>,
    /// Labels parallel to `samples`.
    pub labels: Vec<Label>,
    /// Aggregates over valid samples.
    pub summary: Option<ThroughputSummary>,
    /// Aligned/misaligned decision.
    pub verdict: Verdict,
    /// Reliability notes.
    pub diagnostics: Diagnostics,
    /// Run metadata.
    pub metadata: Metadata,
}

impl ProbeResult {
    /// Samples paired with their labels, in offset order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.samples
            .iter()
            .zip(self.labels.iter())
            .map(|(sample, label)| Row {
                sample: *sample,
                label: *label,
            })
    }

    /// Base offsets labeled good.
    pub fn good_offsets(&self) -> Vec<u64> {
        self.rows()
            .filter(|row| row.label.is_good())
            .map(|row| row.sample.base_offset)
            .collect()
    }
}
