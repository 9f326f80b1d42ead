//! Report rendering: the vectors file and the coverage summary.

use std::fmt::Write;

use anyhow::Result;

use crate::driver::CoverageReport;
use faultline_podem::TestOutcome;

/// One line per fault: the fault spec and its vector or verdict.
pub fn render_vectors(report: &CoverageReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        match &result.outcome {
            TestOutcome::Detected(vector) => {
                let _ = writeln!(out, "{} {}", result.fault, vector);
            }
            TestOutcome::Untestable => {
                let _ = writeln!(out, "{} UNTESTABLE", result.fault);
            }
            TestOutcome::Aborted => {
                let _ = writeln!(out, "{} ABORTED", result.fault);
            }
        }
    }
    out
}

/// The framed plain-text coverage summary.
pub fn render_report(report: &CoverageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "================ Fault Coverage Report ================");
    let _ = writeln!(out);
    let _ = writeln!(out, "    Faults:     {}", report.total);
    let _ = writeln!(out, "    Detected:   {}", report.detected);
    let _ = writeln!(out, "    Untestable: {}", report.untestable);
    let _ = writeln!(out, "    Aborted:    {}", report.aborted);
    if let Some(mismatches) = report.verify_mismatches {
        let _ = writeln!(out, "    Verified:   {} mismatches", mismatches);
    }
    let _ = writeln!(out, "    Coverage:   {:.2} %", report.coverage_percent());
    let _ = writeln!(out);
    let _ = writeln!(out, "-------------------------------------------------------");
    let _ = writeln!(
        out,
        "Total Time Taken: {:.4} seconds",
        report.wall_time.as_secs_f64()
    );
    let _ = writeln!(out, "=======================================================");
    out
}

/// The full report, results included, as pretty JSON.
pub fn render_json(report: &CoverageReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
