use crate::error::DatasetResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Stable identifier for a dataset file (sha256 of its bytes, hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(pub String);

impl DatasetId {
    /// Leading characters of the hash, used as a version segment in remote paths.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInstruction {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One supervised tuning record as the remote API expects it.
///
/// Validation does not require this shape; it is only used for statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(default)]
    pub contents: Vec<Content>,
}

impl TuningExample {
    /// Texts that count toward training volume: the system instruction's first
    /// part, then the first part of every content turn. Empty texts are dropped.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        let system = self
            .system_instruction
            .as_ref()
            .and_then(|s| s.parts.first())
            .map(|p| p.text.as_str());

        system
            .into_iter()
            .chain(self.contents.iter().filter_map(|c| c.parts.first()).map(|p| p.text.as_str()))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Hash the file's bytes.
pub fn compute_dataset_id(path: &Path) -> DatasetResult<DatasetId> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(DatasetId(hex::encode(hasher.finalize())))
}
