//! JSONL structural validation.
//!
//! Every non-blank line must parse as one standalone JSON value. Failures are
//! recorded in the report, never raised, so a single run surfaces every bad
//! line in every file.

use crate::discovery::{discover, DiscoveryOptions};
use crate::error::{DatasetError, DatasetResult};
use crate::report::{AggregateReport, FileDiagnostic, FileReport, LineOutcome};
use serde::de::IgnoredAny;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Validate `paths`, or the files found by `discovery` when `paths` is empty.
///
/// Explicit paths are reported in the order given; discovered paths in
/// lexicographic order. The only error is [`DatasetError::NoInput`]: per-file
/// and per-line problems live in the report.
pub fn validate(paths: &[PathBuf], discovery: &DiscoveryOptions) -> DatasetResult<AggregateReport> {
    let paths = if paths.is_empty() {
        let found = discover(discovery);
        if found.is_empty() {
            return Err(DatasetError::NoInput {
                root: discovery.root.clone(),
                extension: discovery.extension.clone(),
            });
        }
        found
    } else {
        paths.to_vec()
    };

    let report = AggregateReport { files: paths.iter().map(|p| validate_file(p)).collect() };

    tracing::info!(
        files = report.files.len(),
        passed = report.passed_count(),
        failed = report.failed_count(),
        invalid_lines = report.invalid_line_count(),
        "Validation finished"
    );
    Ok(report)
}

/// Validate a single file. Open failures become a `FileUnreadable` diagnostic.
pub fn validate_file(path: &Path) -> FileReport {
    tracing::debug!(path = %path.display(), "Validating dataset file");
    match File::open(path) {
        Ok(file) => validate_reader(path, BufReader::new(file)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Dataset file unreadable");
            FileReport::unreadable(path.to_path_buf(), e.to_string())
        }
    }
}

/// Scan `reader` line by line. `path` is only used to label the report.
pub fn validate_reader<R: BufRead>(path: &Path, mut reader: R) -> FileReport {
    let mut report = FileReport::new(path.to_path_buf());
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), line = line_no + 1, error = %e, "Read failed mid-file");
                report.diagnostic = Some(FileDiagnostic::FileUnreadable { reason: e.to_string() });
                return report;
            }
        }
        line_no += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if is_blank(&buf) {
            continue;
        }

        // IgnoredAny checks syntax only: no number range or nesting depth limits.
        match serde_json::from_slice::<IgnoredAny>(&buf) {
            Ok(_) => report.lines.push(LineOutcome::Valid { line: line_no }),
            Err(e) => {
                tracing::debug!(path = %path.display(), line = line_no, error = %e, "Invalid JSON line");
                report.lines.push(LineOutcome::Invalid { line: line_no, reason: e.to_string() });
            }
        }
    }

    if report.lines.is_empty() {
        report.diagnostic = Some(FileDiagnostic::EmptyDataset);
    }
    report
}

// Non-UTF-8 lines are never blank; the parser reports them.
fn is_blank(line: &[u8]) -> bool {
    std::str::from_utf8(line).is_ok_and(|s| s.trim().is_empty())
}
