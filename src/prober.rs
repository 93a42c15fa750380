//! Main `AlignmentProbe` entry point and builder.

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::analysis::{classify, compute_diagnostics};
use crate::config::{Mode, RunConfig};
use crate::device;
use crate::error::{ProbeError, Result};
use crate::measurement::{elapsed_secs, estimate_resolution, Clock, MonotonicClock, Progress, Sweep};
use crate::preflight::run_all_checks;
use crate::result::{Metadata, ProbeResult};

/// Main entry point for alignment probing.
///
/// Use the builder pattern to configure and run a probe.
///
/// # Example
///
/// ```no_run
/// use align_probe::{AlignmentProbe, Mode};
///
/// let result = AlignmentProbe::new()
///     .mode(Mode::Read)
///     .interval_size(128 * 1024)
///     .offset_step(4096)
///     .repeat_count(256)
///     .run_path("/dev/sdb".as_ref())
///     .unwrap();
///
/// if result.verdict.is_aligned {
///     println!("aligned");
/// }
/// ```
///
/// # Pipeline
///
/// 1. Validate the configuration (clamps the interval to one block)
/// 2. Preflight: device extent and clock resolution
/// 3. Sweep every base offset, one timed trial each
/// 4. Classify the complete sample set and attach diagnostics
///
/// An I/O failure in step 3 aborts the run; nothing is classified.
#[derive(Debug, Clone, Default)]
pub struct AlignmentProbe {
    config: RunConfig,
}

impl AlignmentProbe {
    /// Create with default configuration (read mode, 512-byte blocks and steps).
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
        }
    }

    /// Create from an existing configuration.
    pub fn with_config(config: RunConfig) -> Self {
        Self { config }
    }

    /// Set read/write mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set bytes per I/O operation.
    pub fn block_size(mut self, bytes: u64) -> Self {
        self.config.block_size = bytes;
        self
    }

    /// Set the size of the physical unit being probed.
    pub fn interval_size(mut self, bytes: u64) -> Self {
        self.config.interval_size = bytes;
        self
    }

    /// Set the distance between candidate base offsets.
    pub fn offset_step(mut self, bytes: u64) -> Self {
        self.config.offset_step = bytes;
        self
    }

    /// Set strided repetitions per base offset.
    pub fn repeat_count(mut self, n: u64) -> Self {
        self.config.repeat_count = n;
        self
    }

    /// Set the repetition index the timed range starts at.
    pub fn skip_count(mut self, n: u64) -> Self {
        self.config.skip_count = n;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Open `path` with the access the mode needs and probe it.
    pub fn run_path(&self, path: &Path) -> Result<ProbeResult> {
        let mut file = device::open(path, self.config.mode)?;
        let mut result = self.run(&mut file)?;
        result.metadata.device = Some(path.display().to_string());
        Ok(result)
    }

    /// Probe an already opened handle using the system monotonic clock.
    pub fn run<D>(&self, device: &mut D) -> Result<ProbeResult>
    where
        D: Read + Write + Seek + ?Sized,
    {
        self.run_with(device, MonotonicClock::new(), |_| {})
    }

    /// Probe an already opened handle with a custom clock and a progress
    /// callback invoked before each trial.
    pub fn run_with<D, C, F>(&self, device: &mut D, clock: C, progress: F) -> Result<ProbeResult>
    where
        D: Read + Write + Seek + ?Sized,
        C: Clock,
        F: FnMut(Progress),
    {
        let config = self.config.validated()?;

        let device_len = match device::device_len(device) {
            // Some block devices report no size through seek-to-end
            Ok(0) => {
                tracing::debug!("device reports zero length; skipping extent check");
                None
            }
            Ok(len) => Some(len),
            Err(err) => {
                tracing::debug!(error = %err, "device length unknown; skipping extent check");
                None
            }
        };
        let resolution = estimate_resolution(&clock);

        let preflight = run_all_checks(&config, device_len, resolution);
        let preflight_warnings = preflight.descriptions();
        if preflight.has_critical {
            for warning in &preflight_warnings {
                tracing::error!("{warning}");
            }
            return Err(ProbeError::Preflight(preflight_warnings.join(" ")));
        }
        for warning in &preflight_warnings {
            tracing::warn!("{warning}");
        }

        let started = clock.now();
        let samples = Sweep::with_clock(&config, &clock)
            .on_progress(progress)
            .run(device)?;
        let runtime_secs = elapsed_secs(started, clock.now());

        let classification = classify(&samples);
        let mut diagnostics = compute_diagnostics(&samples, &classification, resolution);
        let mut warnings = preflight_warnings;
        warnings.append(&mut diagnostics.warnings);
        diagnostics.warnings = warnings;

        let verdict = classification.verdict;
        tracing::info!(
            aligned = verdict.is_aligned,
            recommended_offset = verdict.recommended_offset,
            condition = ?verdict.condition,
            "classification complete"
        );

        Ok(ProbeResult {
            config,
            samples,
            labels: classification.labels,
            summary: classification.summary,
            verdict,
            diagnostics,
            metadata: Metadata {
                device: None,
                device_len,
                clock: clock.name().to_string(),
                runtime_secs,
            },
        })
    }
}
