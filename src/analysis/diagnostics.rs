//! Reliability diagnostics for a classified run.
//!
//! Checks performed:
//! 1. Invalid samples: trials shorter than the clock could resolve
//! 2. Degenerate condition: single sample, uniform throughput, nothing valid
//! 3. Clock resolution: trials only a few ticks long are noisy

use std::time::Duration;

use crate::result::{Classification, Diagnostics, Label};
use crate::types::Sample;

/// Trials shorter than this many clock ticks get a precision warning.
const MIN_TICKS_PER_TRIAL: f64 = 100.0;

/// Collect diagnostics for a classified sample set.
pub fn compute_diagnostics(
    samples: &[Sample],
    classification: &Classification,
    clock_resolution: Option<Duration>,
) -> Diagnostics {
    let mut warnings = Vec::new();

    // 1. Invalid samples
    let invalid_samples = classification
        .labels
        .iter()
        .filter(|l| **l == Label::Invalid)
        .count();
    if invalid_samples > 0 {
        warnings.push(format!(
            "{} of {} trials took no measurable time and were excluded.",
            invalid_samples,
            samples.len()
        ));
    }

    // 2. Degenerate condition
    if let Some(note) = classification.verdict.condition.note() {
        warnings.push(format!("Inconclusive: {note}."));
    }

    // 3. Clock resolution versus the shortest trial
    let clock_resolution_ns = clock_resolution.map(|r| r.as_secs_f64() * 1e9);
    if let Some(resolution_ns) = clock_resolution_ns {
        let shortest_ns = samples
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| s.duration_secs * 1e9)
            .fold(f64::INFINITY, f64::min);
        if shortest_ns.is_finite() && shortest_ns < resolution_ns * MIN_TICKS_PER_TRIAL {
            warnings.push(format!(
                "Shortest trial ({:.0} ns) is under {:.0} clock ticks ({:.0} ns each); throughput figures are imprecise.",
                shortest_ns, MIN_TICKS_PER_TRIAL, resolution_ns
            ));
        }
    }

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    Diagnostics {
        invalid_samples,
        clock_resolution_ns,
        warnings,
    }
}
