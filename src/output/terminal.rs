//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{Label, ProbeResult, Row, Verdict};

/// Table header, column-aligned with [`format_row`].
pub const HEADER: &str = "OFFSET     DURATION      THROUGHPUT";

/// Format a ProbeResult as the offset table followed by the verdict.
pub fn format_result(result: &ProbeResult) -> String {
    let mut output = String::new();

    output.push_str(HEADER);
    output.push('\n');
    for row in result.rows() {
        output.push_str(&format_row(&row));
        output.push('\n');
    }

    output.push_str(&format_verdict(&result.verdict));
    output.push('\n');

    if result.diagnostics.has_warnings() {
        output.push('\n');
        for warning in &result.diagnostics.warnings {
            output.push_str(&format!("{} {}\n", "Note:".yellow(), warning));
        }
    }

    output
}

/// One table row: offset, duration, throughput, and a marker for good samples.
pub fn format_row(row: &Row) -> String {
    let marker = match row.label {
        Label::Good => format!(" {}", "<--".green().bold()),
        Label::Bad => String::new(),
        Label::Invalid => format!(" {}", "(excluded)".dimmed()),
    };
    format!(
        "{:>6} {:>10.2} s {:>10.2} MB/s{}",
        row.sample.base_offset, row.sample.duration_secs, row.sample.throughput, marker
    )
}

/// The closing aligned/misaligned statement.
pub fn format_verdict(verdict: &Verdict) -> String {
    if verdict.is_aligned {
        "The partition looks to be aligned".green().to_string()
    } else {
        format!(
            "{}, recommended offset is {} ({} 512b sectors)",
            "The partition doesn't look to be aligned".red(),
            verdict.recommended_offset,
            verdict.recommended_sectors()
        )
    }
}
