//! Candidate offset generation.
//!
//! Base offsets sweep one interval in `offset_step` increments. Each base
//! offset is then exercised at `repeat_count` positions spaced exactly one
//! interval apart, so every access shares the same phase modulo the interval
//! while never touching the same sector twice. That stride is what keeps page
//! cache and read-ahead from flattering repeated accesses.

use crate::config::RunConfig;

/// Offsets a sweep visits, derived from a validated [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPlan {
    interval: u64,
    step: u64,
    skip: u64,
    repeat: u64,
}

impl OffsetPlan {
    /// Build the plan for a config.
    ///
    /// Offsets are only meaningful for a config that passed
    /// [`RunConfig::validated`]; otherwise they saturate at `u64::MAX`.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            interval: config.effective_interval(),
            step: config.offset_step.max(1),
            skip: config.skip_count,
            repeat: config.repeat_count,
        }
    }

    /// Number of base offsets (samples) in the sweep.
    pub fn len(&self) -> usize {
        self.interval.div_ceil(self.step) as usize
    }

    /// Whether the sweep visits no offsets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Base offsets `0, step, 2*step, ...` strictly below the interval.
    pub fn base_offsets(&self) -> impl Iterator<Item = u64> {
        let step = self.step;
        (0..self.len() as u64).map(move |i| i * step)
    }

    /// Trial offsets for one base: `base + interval * i` for
    /// `i` in `skip .. skip + repeat`.
    pub fn trial_offsets(&self, base_offset: u64) -> impl Iterator<Item = u64> {
        let interval = self.interval;
        (self.skip..self.skip.saturating_add(self.repeat))
            .map(move |i| base_offset.saturating_add(interval.saturating_mul(i)))
    }

    /// One past the last byte any trial touches, for a given block size.
    pub fn extent(&self, block_size: u64) -> u64 {
        let last_base = self.step.saturating_mul((self.len() as u64).saturating_sub(1));
        let last_rep = self.skip.saturating_add(self.repeat).saturating_sub(1);
        last_base
            .saturating_add(self.interval.saturating_mul(last_rep))
            .saturating_add(block_size)
    }
}
