//! Device extent check.
//!
//! The furthest trial reads one block at
//! `last_base + interval * (skip + repeat - 1)`. If that lies past the end of
//! the device the sweep would fail partway through with a short read, after
//! minutes of I/O. Catch it up front instead.

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::measurement::OffsetPlan;

/// Warning from the extent check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtentWarning {
    /// Reads would run past the end of the device.
    ///
    /// Critical: the sweep cannot complete.
    ReadPastEnd {
        /// One past the last byte a trial touches.
        extent: u64,
        /// Device length in bytes.
        device_len: u64,
    },

    /// Writes would run past the end of the device.
    ///
    /// A regular file grows to fit; a block device fails mid-sweep.
    WritePastEnd {
        /// One past the last byte a trial touches.
        extent: u64,
        /// Device length in bytes.
        device_len: u64,
    },
}

impl ExtentWarning {
    /// Check if this warning indicates a critical issue.
    pub fn is_critical(&self) -> bool {
        matches!(self, ExtentWarning::ReadPastEnd { .. })
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            ExtentWarning::ReadPastEnd { extent, device_len } => format!(
                "Sweep reads up to byte {} but the device is only {} bytes. \
                 Reduce the repeat count, skip count or interval size.",
                extent, device_len
            ),
            ExtentWarning::WritePastEnd { extent, device_len } => format!(
                "Sweep writes up to byte {} past the device length of {} bytes; \
                 a regular file will be extended.",
                extent, device_len
            ),
        }
    }
}

/// Compare the sweep's extent to the device length.
pub fn extent_check(config: &RunConfig, device_len: u64) -> Option<ExtentWarning> {
    let extent = OffsetPlan::new(config).extent(config.block_size);
    if extent <= device_len {
        return None;
    }
    if config.mode.reads() {
        Some(ExtentWarning::ReadPastEnd { extent, device_len })
    } else {
        Some(ExtentWarning::WritePastEnd { extent, device_len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    fn config(mode: Mode) -> RunConfig {
        RunConfig {
            interval_size: 4096,
            repeat_count: 4,
            mode,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_fits() {
        // last base 3584, last repetition 3: 3584 + 12288 + 512
        assert_eq!(extent_check(&config(Mode::Read), 16384), None);
    }

    #[test]
    fn test_read_past_end_is_critical() {
        let warning = extent_check(&config(Mode::ReadWrite), 16383).unwrap();
        assert!(warning.is_critical());
        assert_eq!(
            warning,
            ExtentWarning::ReadPastEnd {
                extent: 16384,
                device_len: 16383
            }
        );
    }

    #[test]
    fn test_write_past_end_is_not_critical() {
        let warning = extent_check(&config(Mode::Write), 1000).unwrap();
        assert!(!warning.is_critical());
    }
}
