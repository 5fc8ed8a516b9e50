//! Dataset file discovery.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where to look for datasets when no paths are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub root: PathBuf,
    /// Extension without the leading dot, matched case-insensitively.
    pub extension: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self { root: PathBuf::from("data"), extension: "jsonl".to_string() }
    }
}

impl DiscoveryOptions {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self { root: root.into(), extension: extension.trim_start_matches('.').to_string() }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

/// Recursively list files under `options.root` with the configured extension,
/// sorted lexicographically. A missing root yields an empty list.
///
/// Walk errors never abort discovery. A failing entry that looks like a
/// dataset (e.g. a dangling `*.jsonl` symlink) is still listed so validation
/// reports it as unreadable; anything else is logged and skipped.
pub fn discover(options: &DiscoveryOptions) -> Vec<PathBuf> {
    if !options.root.exists() {
        tracing::debug!(root = %options.root.display(), "Discovery root does not exist");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&options.root).follow_links(true) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && options.matches(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => match e.path() {
                Some(path) if options.matches(path) => {
                    tracing::debug!(path = %path.display(), error = %e, "Listing unreadable dataset entry");
                    files.push(path.to_path_buf());
                }
                _ => tracing::warn!(error = %e, "Skipping unreadable entry during discovery"),
            },
        }
    }

    files.sort();
    tracing::debug!(root = %options.root.display(), count = files.len(), "Discovered dataset files");
    files
}
