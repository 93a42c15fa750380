//! Sample and unit types shared across the engine and classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bytes per megabyte used for throughput reporting (MiB).
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Legacy sector size used when expressing offsets as sector counts.
pub const SECTOR_SIZE: u64 = 512;

/// One throughput measurement for a candidate base offset.
///
/// Samples are immutable once the engine emits them. A sample whose
/// `duration_secs` is zero (clock too coarse for the trial) carries a
/// non-finite throughput and is treated as invalid by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Byte offset within the probed interval.
    pub base_offset: u64,
    /// Wall-clock seconds spent on the whole trial.
    pub duration_secs: f64,
    /// Throughput in MB/s (1 MB = 1024 * 1024 bytes).
    ///
    /// Serialized as `null` when non-finite; `null` reads back as NaN.
    #[serde(with = "finite_or_null")]
    pub throughput: f64,
}

mod finite_or_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl Sample {
    /// Build a sample from the bytes moved and the measured duration.
    ///
    /// A zero duration yields `f64::INFINITY` (or NaN when no bytes moved)
    /// rather than panicking; [`Sample::is_valid`] reports such samples.
    pub fn from_trial(base_offset: u64, bytes_moved: u64, duration_secs: f64) -> Self {
        let throughput = bytes_moved as f64 / duration_secs / BYTES_PER_MB;
        Self {
            base_offset,
            duration_secs,
            throughput,
        }
    }

    /// Build a sample with an already computed throughput.
    pub fn new(base_offset: u64, duration_secs: f64, throughput: f64) -> Self {
        Self {
            base_offset,
            duration_secs,
            throughput,
        }
    }

    /// Whether the sample can take part in classification.
    pub fn is_valid(&self) -> bool {
        self.duration_secs > 0.0 && self.throughput.is_finite()
    }
}

/// The I/O operation a trial step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoOp {
    /// Positioning the handle.
    Seek,
    /// Reading one block.
    Read,
    /// Writing one block.
    Write,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOp::Seek => f.write_str("seek"),
            IoOp::Read => f.write_str("read"),
            IoOp::Write => f.write_str("write"),
        }
    }
}
