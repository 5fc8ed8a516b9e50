//! Dataset statistics for sizing a tuning run.

use crate::dataset::TuningExample;
use crate::error::{DatasetError, DatasetResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub path: PathBuf,
    pub examples: usize,
    /// Non-blank lines that did not parse as a tuning example.
    pub skipped_lines: Vec<usize>,
    pub text_segments: usize,
    pub characters: usize,
    pub epochs: u32,
}

impl DatasetStats {
    /// Characters the tuning service will see across all epochs.
    #[must_use]
    pub fn characters_for_epochs(&self) -> usize {
        self.characters * self.epochs as usize
    }
}

pub fn dataset_stats(path: &Path, epochs: u32) -> DatasetResult<DatasetStats> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut stats = DatasetStats {
        path: path.to_path_buf(),
        examples: 0,
        skipped_lines: Vec::new(),
        text_segments: 0,
        characters: 0,
        epochs,
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<TuningExample>(line) {
            Ok(example) => {
                let texts = example.texts();
                stats.text_segments += texts.len();
                stats.characters += texts.iter().map(|t| t.chars().count()).sum::<usize>();
                stats.examples += 1;
            }
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "Skipping line that is not a tuning example");
                stats.skipped_lines.push(idx + 1);
            }
        }
    }

    Ok(stats)
}
