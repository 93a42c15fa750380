//! Measurement infrastructure for the offset sweep.
//!
//! This module provides:
//! - A [`Clock`] abstraction with an `Instant`-backed default
//! - Offset generation that strides one interval per repetition
//! - The [`Sweep`] engine producing one [`Sample`](crate::Sample) per base offset
//!
//! # Cache Defeat
//!
//! Repeating a trial at the same location would be served from the page
//! cache or read-ahead after the first access. Instead, repetition `i` of base
//! offset `b` goes to `b + interval * i`: same phase within the physical unit,
//! different sectors every time.

mod offsets;
mod sweep;
mod timer;

pub use offsets::OffsetPlan;
pub use sweep::{Progress, Sweep};
pub use timer::{elapsed_secs, estimate_resolution, Clock, MonotonicClock};
