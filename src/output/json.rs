//! JSON serialization for probe results.

use crate::result::ProbeResult;

/// Serialize a ProbeResult to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for ProbeResult).
pub fn to_json(result: &ProbeResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Serialize a ProbeResult to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for ProbeResult).
pub fn to_json_pretty(result: &ProbeResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
