//! Preflight checks run before any timed I/O.
//!
//! # Checks Performed
//!
//! - **Extent**: the furthest trial offset plus one block fits on the device
//! - **Resolution**: the clock ticks finely enough to time a trial

mod extent;
mod resolution;

pub use extent::{extent_check, ExtentWarning};
pub use resolution::{resolution_check, ResolutionWarning, COARSE_RESOLUTION};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;

/// Result of running all preflight checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreflightResult {
    /// Warnings from the extent check.
    pub extent: Vec<ExtentWarning>,

    /// Warnings from the resolution check.
    pub resolution: Vec<ResolutionWarning>,

    /// Whether any critical warnings were found.
    pub has_critical: bool,
}

impl PreflightResult {
    /// Create a new empty preflight result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extent warning.
    pub fn add_extent_warning(&mut self, warning: ExtentWarning) {
        if warning.is_critical() {
            self.has_critical = true;
        }
        self.extent.push(warning);
    }

    /// Add a resolution warning. These are never critical.
    pub fn add_resolution_warning(&mut self, warning: ResolutionWarning) {
        self.resolution.push(warning);
    }

    /// Descriptions of every warning, critical first.
    pub fn descriptions(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .extent
            .iter()
            .filter(|w| w.is_critical())
            .map(ExtentWarning::description)
            .collect();
        out.extend(
            self.extent
                .iter()
                .filter(|w| !w.is_critical())
                .map(ExtentWarning::description),
        );
        out.extend(self.resolution.iter().map(ResolutionWarning::description));
        out
    }
}

/// Run all preflight checks and collect warnings.
///
/// # Arguments
///
/// * `config` - Validated run configuration
/// * `device_len` - Device length in bytes, if known
/// * `clock_resolution` - Estimated clock resolution, `None` if no tick was seen
pub fn run_all_checks(
    config: &RunConfig,
    device_len: Option<u64>,
    clock_resolution: Option<Duration>,
) -> PreflightResult {
    let mut result = PreflightResult::new();

    if let Some(len) = device_len {
        if let Some(warning) = extent_check(config, len) {
            result.add_extent_warning(warning);
        }
    }

    if let Some(warning) = resolution_check(clock_resolution) {
        result.add_resolution_warning(warning);
    }

    result
}
