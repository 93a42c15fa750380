//! Statistical aggregates used by the alignment classifier.

mod summary;

pub use summary::{summarize, ThroughputSummary};
