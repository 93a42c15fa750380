//! Configuration for an alignment probe run.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bytes per I/O operation.
pub const DEFAULT_BLOCK_SIZE: u64 = 512;

/// Default distance between candidate base offsets.
pub const DEFAULT_OFFSET_STEP: u64 = 512;

/// Default strided repetitions per base offset.
pub const DEFAULT_REPEAT_COUNT: u64 = 64;

/// Prefix of the environment variables read by [`RunConfig::merge_env`].
pub const ENV_PREFIX: &str = "ALIGN_PROBE_";

/// Which operations each trial performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Read one block per repetition.
    #[default]
    Read,
    /// Write one zero-filled block per repetition. Destroys device contents.
    Write,
    /// Read then write the same block per repetition.
    ReadWrite,
}

impl Mode {
    /// Combine read/write flags into a mode.
    pub fn from_flags(read: bool, write: bool) -> Result<Self, ConfigError> {
        match (read, write) {
            (true, true) => Ok(Mode::ReadWrite),
            (true, false) => Ok(Mode::Read),
            (false, true) => Ok(Mode::Write),
            (false, false) => Err(ConfigError::NoMode),
        }
    }

    /// Whether trials read from the device.
    pub fn reads(self) -> bool {
        matches!(self, Mode::Read | Mode::ReadWrite)
    }

    /// Whether trials write to the device.
    pub fn writes(self) -> bool {
        matches!(self, Mode::Write | Mode::ReadWrite)
    }

    /// Short label used in warnings and reports.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Read => "read",
            Mode::Write => "write",
            Mode::ReadWrite => "read+write",
        }
    }
}

/// Immutable configuration for one probe run.
///
/// Construct it once (defaults, then environment, then explicit settings),
/// call [`RunConfig::validated`], and pass it by reference into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Bytes per I/O operation (default: 512).
    pub block_size: u64,

    /// Size of the physical unit being probed (erase block, stripe).
    ///
    /// Values below `block_size` are clamped up to `block_size`.
    pub interval_size: u64,

    /// Distance between candidate base offsets (default: 512).
    pub offset_step: u64,

    /// Strided repetitions timed per base offset (default: 64).
    pub repeat_count: u64,

    /// Repetition index the timed range starts at (default: 0).
    ///
    /// The first `skip_count` interval-sized strides are never touched,
    /// which keeps the probe away from the head of the device.
    pub skip_count: u64,

    /// Read, write, or both.
    pub mode: Mode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            interval_size: 0,
            offset_step: DEFAULT_OFFSET_STEP,
            repeat_count: DEFAULT_REPEAT_COUNT,
            skip_count: 0,
            mode: Mode::Read,
        }
    }
}

impl RunConfig {
    /// Interval size after clamping to at least one block.
    pub fn effective_interval(&self) -> u64 {
        self.interval_size.max(self.block_size)
    }

    /// Bytes moved by one trial (one direction).
    pub fn bytes_per_trial(&self) -> u64 {
        self.block_size.saturating_mul(self.repeat_count)
    }

    /// Check all fields and return a copy with `interval_size` clamped.
    pub fn validated(&self) -> Result<Self, ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.offset_step == 0 {
            return Err(ConfigError::ZeroOffsetStep);
        }
        if self.repeat_count == 0 {
            return Err(ConfigError::ZeroRepeatCount);
        }

        let interval_size = self.effective_interval();
        let repetitions = self.skip_count.saturating_add(self.repeat_count);
        let overflow = ConfigError::ExtentOverflow {
            interval_size,
            repetitions,
        };
        // Furthest byte touched must stay addressable as a signed file offset.
        let extent = interval_size
            .checked_mul(repetitions)
            .and_then(|n| n.checked_add(self.block_size))
            .ok_or_else(|| overflow.clone())?;
        if extent > i64::MAX as u64 {
            return Err(overflow);
        }

        Ok(Self {
            interval_size,
            ..self.clone()
        })
    }

    /// Overlay `ALIGN_PROBE_*` environment variables onto this config.
    ///
    /// Recognized: `BLOCK_SIZE`, `INTERVAL_SIZE`, `OFFSET_STEP`, `COUNT`,
    /// `SKIP_COUNT`. Values that fail to parse are ignored with a warning.
    pub fn merge_env(mut self) -> Self {
        if let Some(v) = parse_u64_env("BLOCK_SIZE") {
            self.block_size = v;
        }
        if let Some(v) = parse_u64_env("INTERVAL_SIZE") {
            self.interval_size = v;
        }
        if let Some(v) = parse_u64_env("OFFSET_STEP") {
            self.offset_step = v;
        }
        if let Some(v) = parse_u64_env("COUNT") {
            self.repeat_count = v;
        }
        if let Some(v) = parse_u64_env("SKIP_COUNT") {
            self.skip_count = v;
        }
        self
    }
}

fn parse_u64_env(suffix: &str) -> Option<u64> {
    let key = format!("{ENV_PREFIX}{suffix}");
    let raw = env::var(&key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(%key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
