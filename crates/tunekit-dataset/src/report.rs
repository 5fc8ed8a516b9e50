//! Validation report types.
//!
//! A report is plain data: the validator fills it in, the caller decides how to
//! print it and which exit code to use.

use serde::Serialize;
use std::path::PathBuf;

/// Pass/fail status for a single file or a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    #[must_use]
    pub fn is_passed(self) -> bool {
        self == Self::Passed
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => f.write_str("PASSED"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// Outcome for one non-blank line. Line numbers are 1-based and match the file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LineOutcome {
    Valid { line: usize },
    /// `reason` is the JSON parser's message, unmodified.
    Invalid { line: usize, reason: String },
}

impl LineOutcome {
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Valid { line } | Self::Invalid { line, .. } => *line,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// File-level problem that fails the file regardless of its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileDiagnostic {
    /// The file could not be opened, or reading stopped on an I/O error.
    FileUnreadable { reason: String },
    /// The file has no non-blank lines.
    EmptyDataset,
}

impl std::fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileUnreadable { reason } => write!(f, "file unreadable: {reason}"),
            Self::EmptyDataset => f.write_str("no records found (file is empty or blank)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub lines: Vec<LineOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<FileDiagnostic>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, lines: Vec::new(), diagnostic: None }
    }

    #[must_use]
    pub fn unreadable(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            lines: Vec::new(),
            diagnostic: Some(FileDiagnostic::FileUnreadable { reason: reason.into() }),
        }
    }

    /// `Passed` iff at least one line was read, none is invalid, and there is
    /// no file-level diagnostic.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.diagnostic.is_none() && self.valid_count() > 0 && self.invalid_count() == 0 {
            Status::Passed
        } else {
            Status::Failed
        }
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_valid()).count()
    }

    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.lines.len() - self.valid_count()
    }

    /// Invalid lines as `(line, reason)` in file order.
    pub fn invalid_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().filter_map(|l| match l {
            LineOutcome::Invalid { line, reason } => Some((*line, reason.as_str())),
            LineOutcome::Valid { .. } => None,
        })
    }
}

/// Complete outcome of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub files: Vec<FileReport>,
}

impl AggregateReport {
    /// `Passed` iff at least one file was processed and every file passed.
    #[must_use]
    pub fn status(&self) -> Status {
        if !self.files.is_empty() && self.files.iter().all(|f| f.status().is_passed()) {
            Status::Passed
        } else {
            Status::Failed
        }
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.files.iter().filter(|f| f.status().is_passed()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.files.len() - self.passed_count()
    }

    #[must_use]
    pub fn invalid_line_count(&self) -> usize {
        self.files.iter().map(FileReport::invalid_count).sum()
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.status().is_passed() {
            0
        } else {
            1
        }
    }
}
