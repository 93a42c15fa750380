//! The offset sweep: one timed trial per candidate base offset.
//!
//! For each base offset the handle is positioned once (untimed), then the
//! clock runs while the trial seeks to and reads and/or writes one block at
//! every strided position from [`OffsetPlan::trial_offsets`]. The first
//! failing seek, read or write aborts the whole sweep.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::config::RunConfig;
use crate::error::{ProbeError, Result};
use crate::types::{IoOp, Sample};

use super::offsets::OffsetPlan;
use super::timer::{elapsed_secs, Clock, MonotonicClock};

/// Progress notification emitted before each trial starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Zero-based index of the trial about to run.
    pub index: usize,
    /// Total number of trials in the sweep.
    pub total: usize,
    /// Base offset of the trial about to run.
    pub base_offset: u64,
}

/// Benchmark engine running a sweep over one device handle.
pub struct Sweep<'a, C: Clock = MonotonicClock> {
    config: &'a RunConfig,
    clock: C,
    progress: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a> Sweep<'a, MonotonicClock> {
    /// Create a sweep timed by the monotonic system clock.
    ///
    /// `config` is validated again when the sweep runs.
    pub fn new(config: &'a RunConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<'a, C: Clock> Sweep<'a, C> {
    /// Create a sweep timed by a custom clock.
    pub fn with_clock(config: &'a RunConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            progress: None,
        }
    }

    /// Install a progress callback, invoked before each trial.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Progress) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Run every trial in ascending base-offset order.
    ///
    /// Returns one sample per base offset. An invalid configuration is
    /// rejected with [`ProbeError::Config`] before any I/O. On the first I/O
    /// failure the remaining trials are skipped and the error is returned;
    /// samples gathered so far are discarded.
    pub fn run<D>(&mut self, device: &mut D) -> Result<Vec<Sample>>
    where
        D: Read + Write + Seek + ?Sized,
    {
        let config = self.config.validated()?;
        let plan = OffsetPlan::new(&config);
        let block_len = usize::try_from(config.block_size)
            .map_err(|_| ProbeError::Preflight("block size exceeds address space".into()))?;
        let mut buffer = vec![0u8; block_len];
        let total = plan.len();

        tracing::info!(
            trials = total,
            mode = config.mode.label(),
            block_size = config.block_size,
            interval_size = config.interval_size,
            repeat_count = config.repeat_count,
            "starting offset sweep"
        );

        let mut samples = Vec::new();
        for (index, base_offset) in plan.base_offsets().enumerate() {
            if let Some(progress) = self.progress.as_mut() {
                progress(Progress {
                    index,
                    total,
                    base_offset,
                });
            }

            let sample = self.trial(device, &config, &plan, base_offset, &mut buffer)?;
            if !sample.is_valid() {
                tracing::warn!(
                    base_offset,
                    "trial finished within clock resolution; sample will be ignored"
                );
            }
            tracing::debug!(
                base_offset,
                duration_secs = sample.duration_secs,
                throughput = sample.throughput,
                "trial complete"
            );
            samples.push(sample);
        }

        tracing::info!(samples = samples.len(), "offset sweep finished");
        Ok(samples)
    }

    /// Time one base offset across all of its strided repetitions.
    fn trial<D>(
        &self,
        device: &mut D,
        config: &RunConfig,
        plan: &OffsetPlan,
        base_offset: u64,
        buffer: &mut [u8],
    ) -> Result<Sample>
    where
        D: Read + Write + Seek + ?Sized,
    {
        let mode = config.mode;

        // Warm positioning; not timed and not checked.
        if let Err(err) = device.seek(SeekFrom::Start(base_offset)) {
            tracing::debug!(base_offset, error = %err, "warm seek failed");
        }

        let start = self.clock.now();
        for offset in plan.trial_offsets(base_offset) {
            if mode.reads() {
                seek_exact(device, offset)?;
                transfer(IoOp::Read, offset, device.read(buffer), buffer.len())?;
            }
            if mode.writes() {
                seek_exact(device, offset)?;
                transfer(IoOp::Write, offset, device.write(buffer), buffer.len())?;
            }
        }
        let end = self.clock.now();

        Ok(Sample::from_trial(
            base_offset,
            config.bytes_per_trial(),
            elapsed_secs(start, end),
        ))
    }
}

fn seek_exact<D: Seek + ?Sized>(device: &mut D, offset: u64) -> Result<()> {
    let actual = device
        .seek(SeekFrom::Start(offset))
        .map_err(|source| ProbeError::Io {
            op: IoOp::Seek,
            offset,
            source,
        })?;
    if actual != offset {
        return Err(ProbeError::SeekMismatch {
            expected: offset,
            actual,
        });
    }
    Ok(())
}

/// Check a single read/write call moved exactly one block. No retries.
fn transfer(op: IoOp, offset: u64, outcome: std::io::Result<usize>, expected: usize) -> Result<()> {
    match outcome {
        Ok(actual) if actual == expected => Ok(()),
        Ok(actual) => Err(ProbeError::ShortTransfer {
            op,
            offset,
            expected,
            actual,
        }),
        Err(source) => Err(ProbeError::Io { op, offset, source }),
    }
}
