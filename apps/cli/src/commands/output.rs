//! Console rendering for validation reports.

use colored::Colorize;
use tunekit_dataset::{AggregateReport, FileReport, Status};

/// Print one file's status and every invalid line.
pub fn print_file(file: &FileReport) {
    let path = file.path.display().to_string();
    match file.status() {
        Status::Passed => {
            println!("  {} {} {}", "✓".green().bold(), path, "PASSED".green());
            println!("    Records: {}", file.valid_count().to_string().dimmed());
        }
        Status::Failed => {
            println!("  {} {} {}", "✗".red().bold(), path, "FAILED".red());
            if let Some(diagnostic) = &file.diagnostic {
                println!("    {}: {}", "Error".red(), diagnostic.to_string().dimmed());
            }
            for (line, reason) in file.invalid_lines() {
                println!("    {} {}: {}", "line".red(), line, reason.dimmed());
            }
        }
    }
}

/// Print the per-file breakdown followed by the aggregate summary.
pub fn print_report(report: &AggregateReport) {
    for file in &report.files {
        print_file(file);
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  Files:         {}", report.files.len());
    println!("  Passed:        {}", report.passed_count().to_string().green());
    println!("  Failed:        {}", report.failed_count().to_string().red());
    println!("  Invalid lines: {}", report.invalid_line_count());
    println!();

    if report.status().is_passed() {
        println!("{}", "✓ Validation PASSED: all datasets are well-formed JSONL".green().bold());
    } else {
        println!(
            "{}",
            format!("✗ Validation FAILED: {} of {} file(s) failed", report.failed_count(), report.files.len())
                .red()
                .bold()
        );
    }
}
