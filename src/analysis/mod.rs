//! Analysis of a completed sweep.
//!
//! 1. **Classifier** ([`classify`]): labels each sample good/bad against the
//!    max and mean throughput and derives the aligned/misaligned verdict
//! 2. **Diagnostics** ([`compute_diagnostics`]): invalid samples, degenerate
//!    sample sets, clock precision

mod classifier;
mod diagnostics;

pub use classifier::{classify, is_good};
pub use diagnostics::compute_diagnostics;
