//! Dataset validation command.
//!
//! Checks JSONL datasets and gates the pipeline through the exit status.

use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;
use serde::Serialize;
use tunekit_dataset::{AggregateReport, DiscoveryOptions, FileDiagnostic, Status};

use super::output;

/// Execute the validate command.
///
/// Exits the process with status 1 when the aggregate report fails.
pub async fn execute(paths: Vec<PathBuf>, discovery: DiscoveryOptions, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("{}", "tunekit validate".bold().cyan());
        println!();
        if paths.is_empty() {
            println!(
                "  Discovering *.{} under {}...",
                discovery.extension,
                discovery.root.display()
            );
        } else {
            println!("  Validating {} dataset(s)...", paths.len());
        }
        println!();
    }

    let report = tokio::task::spawn_blocking(move || tunekit_dataset::validate(&paths, &discovery))
        .await
        .context("Validation task panicked")?
        .context("Failed to validate datasets")?;

    if json {
        output_json(&report)?;
    } else {
        output::print_report(&report);
    }

    // Exit with error code if any dataset failed
    if !report.status().is_passed() {
        std::process::exit(report.exit_code());
    }

    Ok(())
}

/// Output validation results in JSON format.
fn output_json(report: &AggregateReport) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        status: Status,
        total: usize,
        passed: usize,
        failed: usize,
        invalid_lines: usize,
        files: Vec<JsonFile<'a>>,
    }

    #[derive(Serialize)]
    struct JsonFile<'a> {
        path: String,
        status: Status,
        records: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        diagnostic: Option<&'a FileDiagnostic>,
        invalid: Vec<JsonInvalidLine<'a>>,
    }

    #[derive(Serialize)]
    struct JsonInvalidLine<'a> {
        line: usize,
        reason: &'a str,
    }

    let output = JsonOutput {
        status: report.status(),
        total: report.files.len(),
        passed: report.passed_count(),
        failed: report.failed_count(),
        invalid_lines: report.invalid_line_count(),
        files: report
            .files
            .iter()
            .map(|f| JsonFile {
                path: f.path.display().to_string(),
                status: f.status(),
                records: f.valid_count(),
                diagnostic: f.diagnostic.as_ref(),
                invalid: f.invalid_lines().map(|(line, reason)| JsonInvalidLine { line, reason }).collect(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
