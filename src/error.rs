//! Error types for configuration and probe runs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::IoOp;

/// Invalid configuration, detected before any I/O is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither read nor write was requested.
    #[error("at least one of read or write mode must be selected")]
    NoMode,

    /// Block size of zero.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,

    /// Offset step of zero.
    #[error("offset step must be greater than zero")]
    ZeroOffsetStep,

    /// Repeat count of zero would move no bytes and time nothing.
    #[error("repeat count must be greater than zero")]
    ZeroRepeatCount,

    /// The furthest trial offset does not fit in a 64-bit byte offset.
    #[error("trial extent overflows: interval {interval_size} x {repetitions} repetitions")]
    ExtentOverflow {
        /// Effective interval size in bytes.
        interval_size: u64,
        /// `skip_count + repeat_count`.
        repetitions: u64,
    },

    /// Write mode requested without explicit confirmation.
    #[error("write mode destroys device contents and requires explicit confirmation")]
    WriteNotConfirmed,
}

/// Failure of a probe run. Any of these aborts the sweep; no verdict is produced.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The device could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A seek, read or write call failed outright.
    #[error("{op} error at offset {offset}: {source}")]
    Io {
        /// Operation that failed.
        op: IoOp,
        /// Target offset of the operation.
        offset: u64,
        /// Underlying error.
        source: io::Error,
    },

    /// A seek landed somewhere other than requested.
    #[error("seek error: requested offset {expected}, landed at {actual}")]
    SeekMismatch {
        /// Requested offset.
        expected: u64,
        /// Position reported by the handle.
        actual: u64,
    },

    /// A read or write transferred fewer bytes than one block.
    #[error("short {op} at offset {offset}: {actual} of {expected} bytes")]
    ShortTransfer {
        /// Read or write.
        op: IoOp,
        /// Offset of the transfer.
        offset: u64,
        /// Block size requested.
        expected: usize,
        /// Bytes actually transferred.
        actual: usize,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A check run before the sweep refused to start it.
    #[error("preflight check failed: {0}")]
    Preflight(String),
}

impl ProbeError {
    /// The I/O operation involved, if the error came from a trial step.
    pub fn op(&self) -> Option<IoOp> {
        match self {
            ProbeError::Io { op, .. } | ProbeError::ShortTransfer { op, .. } => Some(*op),
            ProbeError::SeekMismatch { .. } => Some(IoOp::Seek),
            _ => None,
        }
    }

    /// The offset involved, if the error came from a trial step.
    pub fn offset(&self) -> Option<u64> {
        match self {
            ProbeError::Io { offset, .. } | ProbeError::ShortTransfer { offset, .. } => {
                Some(*offset)
            }
            ProbeError::SeekMismatch { expected, .. } => Some(*expected),
            _ => None,
        }
    }
}

/// Convenience alias for probe results.
pub type Result<T> = std::result::Result<T, ProbeError>;
