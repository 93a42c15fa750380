//! Wall-clock sources for timing trials.
//!
//! Trials are timed with a monotonic clock behind the [`Clock`] trait so the
//! engine can be driven by a simulated clock in tests. The default
//! [`MonotonicClock`] wraps `std::time::Instant`.

use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Elapsed time since an arbitrary fixed origin. Never goes backwards.
    fn now(&self) -> Duration;

    /// Short name recorded in result metadata.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// `Instant`-backed clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn name(&self) -> &'static str {
        "monotonic"
    }
}

/// Number of back-to-back reads used to estimate resolution.
const RESOLUTION_PROBES: usize = 1000;

/// Empirically estimate clock resolution as the smallest non-zero difference
/// between consecutive reads.
///
/// Returns `None` if no tick was observed (clock frozen or extremely coarse).
pub fn estimate_resolution<C: Clock + ?Sized>(clock: &C) -> Option<Duration> {
    let mut min_diff: Option<Duration> = None;

    for _ in 0..RESOLUTION_PROBES {
        let t1 = clock.now();
        let t2 = clock.now();
        let diff = t2.saturating_sub(t1);
        if !diff.is_zero() && min_diff.map_or(true, |m| diff < m) {
            min_diff = Some(diff);
        }
    }

    min_diff
}

/// Seconds elapsed between two clock readings, saturating at zero.
#[inline]
pub fn elapsed_secs(start: Duration, end: Duration) -> f64 {
    end.saturating_sub(start).as_secs_f64()
}
