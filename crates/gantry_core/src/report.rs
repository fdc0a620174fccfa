//! Plain-text summary rendering.
//!
//! A pure function of the [`RunReport`]: counts first, then one line per
//! Failed outcome. Streaming/colored output is CLI policy and lives in the
//! `gantry` crate.

use std::fmt::Write;

use crate::outcome::{FailureDetail, RunReport, Status};

/// Render the deterministic run summary.
///
/// Format: `Passed: <p>, Failed: <f>, Skipped: <s>, Total: <t>` followed by
/// one `<fixture>.<unit>[<rowIndex>]: <message>` line per Failed outcome.
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Passed: {}, Failed: {}, Skipped: {}, Total: {}",
        report.passed(),
        report.failed(),
        report.skipped(),
        report.total()
    );

    for outcome in &report.outcomes {
        let Status::Failed { message, detail } = &outcome.status else {
            continue;
        };
        match detail {
            Some(FailureDetail::Mismatch { expected, actual }) => {
                let _ = writeln!(
                    out,
                    "{}: {} (expected {}, actual {})",
                    outcome.label(),
                    message,
                    expected,
                    actual
                );
            }
            _ => {
                let _ = writeln!(out, "{}: {}", outcome.label(), message);
            }
        }
    }

    out
}
