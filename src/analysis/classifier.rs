//! Alignment classification.
//!
//! A sample is *good* when its throughput is strictly closer to the maximum
//! observed throughput than to the mean. The threshold is relative, so it
//! adapts to the device's absolute speed without any tuning constant.
//! The run is aligned when the sample at base offset 0 is good; the
//! recommended offset is the first good base offset in ascending order.

use crate::result::{Classification, Condition, Label, Verdict};
use crate::statistics::{summarize, ThroughputSummary};
use crate::types::Sample;

/// Whether a throughput is strictly closer to `max` than to `mean`.
#[inline]
pub fn is_good(throughput: f64, max: f64, mean: f64) -> bool {
    (throughput - max).abs() < (throughput - mean).abs()
}

/// Classify a complete sample sequence.
///
/// Pure function of its input. Never fails: empty, single-sample,
/// uniform and all-invalid inputs resolve to a "not aligned" verdict with
/// a recommended offset of 0 and the matching [`Condition`].
pub fn classify(samples: &[Sample]) -> Classification {
    let summary = summarize(samples);
    let condition = condition_of(summary.as_ref());

    let labels: Vec<Label> = samples
        .iter()
        .map(|sample| label(sample, summary.as_ref(), condition))
        .collect();

    let is_aligned = samples
        .iter()
        .zip(&labels)
        .any(|(sample, label)| sample.base_offset == 0 && label.is_good());

    let recommended_offset = samples
        .iter()
        .zip(&labels)
        .find(|(_, label)| label.is_good())
        .map_or(0, |(sample, _)| sample.base_offset);

    Classification {
        labels,
        summary,
        verdict: Verdict {
            is_aligned,
            recommended_offset,
            condition,
        },
    }
}

fn condition_of(summary: Option<&ThroughputSummary>) -> Condition {
    match summary {
        None => Condition::NoValidSamples,
        Some(s) if s.count == 1 => Condition::SingleSample,
        Some(s) if s.is_uniform() => Condition::UniformThroughput,
        Some(_) => Condition::Normal,
    }
}

fn label(sample: &Sample, summary: Option<&ThroughputSummary>, condition: Condition) -> Label {
    if !sample.is_valid() {
        return Label::Invalid;
    }
    // Rounding in the mean of identical values must not make them "good".
    if !condition.is_normal() {
        return Label::Bad;
    }
    match summary {
        Some(s) if is_good(sample.throughput, s.max, s.mean) => Label::Good,
        _ => Label::Bad,
    }
}
