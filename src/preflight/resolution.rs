//! Clock resolution check.
//!
//! A trial is timed as one span, so its duration has to be many clock ticks
//! long for the throughput figure to mean anything. This check flags clocks
//! that never tick or tick coarser than a millisecond. It never stops a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Warning from the resolution check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionWarning {
    /// No tick observed between consecutive reads.
    ///
    /// Every trial shorter than the (unknown) tick will be recorded as
    /// zero-duration and excluded from classification.
    NoTickObserved,

    /// The clock ticks coarser than [`COARSE_RESOLUTION`].
    Coarse {
        /// Estimated resolution in nanoseconds.
        resolution_ns: f64,
    },
}

impl ResolutionWarning {
    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            ResolutionWarning::NoTickObserved => {
                "Clock did not advance between consecutive reads; \
                 short trials may be recorded with zero duration."
                    .to_string()
            }
            ResolutionWarning::Coarse { resolution_ns } => {
                format!(
                    "Clock resolution is ~{:.3} ms. Increase the repeat count so each \
                     trial spans many ticks.",
                    resolution_ns / 1e6
                )
            }
        }
    }
}

/// Resolutions above this are considered coarse.
pub const COARSE_RESOLUTION: Duration = Duration::from_millis(1);

/// Check an estimated clock resolution.
pub fn resolution_check(resolution: Option<Duration>) -> Option<ResolutionWarning> {
    match resolution {
        None => Some(ResolutionWarning::NoTickObserved),
        Some(r) if r > COARSE_RESOLUTION => Some(ResolutionWarning::Coarse {
            resolution_ns: r.as_secs_f64() * 1e9,
        }),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_resolution() {
        assert_eq!(resolution_check(Some(Duration::from_nanos(30))), None);
    }

    #[test]
    fn test_coarse_resolution() {
        let warning = resolution_check(Some(Duration::from_millis(10))).unwrap();
        assert!(warning.description().contains("10.000 ms"));
    }

    #[test]
    fn test_frozen_clock() {
        assert_eq!(resolution_check(None), Some(ResolutionWarning::NoTickObserved));
    }
}
