//! Output formatting for probe results.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_result, format_row, format_verdict, HEADER};
