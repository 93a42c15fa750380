//! # align-probe
//!
//! Detect whether a block device (disk, partition, RAID volume, flash) is
//! aligned to its physical write granularity: erase block, stripe, page.
//!
//! The probe times reads and/or writes at every candidate offset within one
//! physical *interval* and classifies each offset by throughput:
//! - One sample per base offset `0, step, 2*step, ... < interval`
//! - Each trial repeats at `base + interval * i`, same phase, fresh sectors
//! - A sample is *good* when its throughput is strictly closer to the
//!   observed maximum than to the mean
//! - The device is aligned when offset 0 is good; otherwise the first good
//!   offset is recommended
//!
//! ## ⚠️ Write Mode Destroys Data
//!
//! [`Mode::Write`] overwrites blocks with zeros across the whole probed
//! extent. Only point it at a device whose contents you can lose.
//! [`Mode::ReadWrite`] writes back what it just read, but a crash mid-trial
//! still leaves the device in an unknown state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use align_probe::{AlignmentProbe, Mode};
//!
//! let result = AlignmentProbe::new()
//!     .mode(Mode::Read)
//!     .interval_size(4 * 1024 * 1024)
//!     .offset_step(64 * 1024)
//!     .repeat_count(128)
//!     .run_path("/dev/sdb".as_ref())?;
//!
//! println!("{}", align_probe::output::format_result(&result));
//! # Ok::<(), align_probe::ProbeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod prober;
mod result;
mod types;

// Functional modules
pub mod analysis;
pub mod device;
pub mod measurement;
pub mod output;
pub mod preflight;
pub mod statistics;

// Re-exports for public API
pub use config::{
    Mode, RunConfig, DEFAULT_BLOCK_SIZE, DEFAULT_OFFSET_STEP, DEFAULT_REPEAT_COUNT, ENV_PREFIX,
};
pub use error::{ConfigError, ProbeError, Result};
pub use measurement::{Clock, MonotonicClock, OffsetPlan, Progress, Sweep};
pub use prober::AlignmentProbe;
pub use result::{
    Classification, Condition, Diagnostics, Label, Metadata, ProbeResult, Row, Verdict,
};
pub use statistics::ThroughputSummary;
pub use types::{IoOp, Sample, BYTES_PER_MB, SECTOR_SIZE};

/// Convenience function: probe `path` with the given configuration.
///
/// Equivalent to `AlignmentProbe::with_config(config).run_path(path)`.
pub fn probe(path: &std::path::Path, config: RunConfig) -> Result<ProbeResult> {
    AlignmentProbe::with_config(config).run_path(path)
}
