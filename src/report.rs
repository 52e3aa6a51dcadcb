//! Output formatting for suite runs.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::suite::{CheckOutcome, SuiteReport};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub base_url: String,
    pub passed: bool,
    pub total: usize,
    pub failed: usize,
    pub checks: Vec<CheckOutcome>,
}

impl JsonReport {
    pub fn from_report(report: &SuiteReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            base_url: report.base_url.clone(),
            passed: report.passed(),
            total: report.total(),
            failed: report.failed(),
            checks: report.outcomes.clone(),
        }
    }
}

pub fn render_json(report: &SuiteReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from_report(report))?)
}

/// Write results in JSON format.
pub fn write_json(report: &SuiteReport) -> anyhow::Result<()> {
    println!("{}", render_json(report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(report: &SuiteReport) {
    // Header
    println!();
    print!("  ");
    print!("{}", "restcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Target: ".dimmed());
    println!("{}", report.base_url);
    println!();

    if report.outcomes.is_empty() {
        println!("  {}", "No checks selected".yellow());
        println!();
        return;
    }

    let mut current_suite = None;
    for outcome in &report.outcomes {
        if current_suite != Some(outcome.suite) {
            println!("  {}", outcome.suite.as_str().bold());
            current_suite = Some(outcome.suite);
        }
        write_outcome(outcome);
    }
    println!();

    write_final_status(report);
    println!();
}

fn write_outcome(outcome: &CheckOutcome) {
    if outcome.passed {
        print!("    {} ", "PASS".green());
    } else {
        print!("    {} ", "FAIL".red());
    }
    print!("{:<44}", outcome.name);
    println!("{}", format!("{:>6} ms", outcome.duration_ms).dimmed());

    if let Some(message) = &outcome.message {
        println!("            {}", message);
    }
}

fn write_final_status(report: &SuiteReport) {
    let passed = report.total() - report.failed();
    print!(
        "  {}",
        format!("{} checks, {} passed, {} failed", report.total(), passed, report.failed()).dimmed()
    );
    print!("  ");

    if report.passed() {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", "FAILED".red());
    }
    println!();
}
