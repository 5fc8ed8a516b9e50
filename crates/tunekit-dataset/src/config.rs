//! Configuration file support.
//!
//! Settings come from a global file (`~/.tunekit/config.toml`) and a local
//! file (`./.tunekitrc`); local values override global ones. CLI flags are
//! applied on top by the binary.

use crate::discovery::DiscoveryOptions;
use crate::tuning::{GcpTarget, DEFAULT_BASE_MODEL, DEFAULT_EPOCHS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunekitConfig {
    /// Directory searched when `validate` is given no paths
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Dataset file extension used by discovery
    #[serde(default)]
    pub extension: Option<String>,

    /// Base model for tuning requests
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub epochs: Option<u32>,

    /// Storage bucket receiving validated datasets
    #[serde(default)]
    pub bucket: Option<String>,

    /// Object prefix inside the bucket
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TunekitConfig {
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    #[must_use]
    pub fn default_global_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".tunekit")
            .join("config.toml")
    }

    #[must_use]
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".tunekitrc")
    }

    /// Load global then local config. Missing files are skipped; files that
    /// exist but fail to load are skipped and returned so the caller can
    /// report them once logging is set up.
    #[must_use]
    pub fn discover_and_load() -> (Self, Vec<ConfigError>) {
        Self::load_layers(&[Self::default_global_path(), Self::default_local_path()])
    }

    /// Merge `paths` in order; later files override earlier ones.
    #[must_use]
    pub fn load_layers(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();
        for path in paths {
            match Self::load_from_file(path) {
                Ok(found) => config.merge(&found),
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => problems.push(e),
            }
        }
        (config, problems)
    }

    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.data_dir, &other.data_dir);
        take(&mut self.extension, &other.extension);
        take(&mut self.model, &other.model);
        take(&mut self.epochs, &other.epochs);
        take(&mut self.bucket, &other.bucket);
        take(&mut self.prefix, &other.prefix);
        take(&mut self.project, &other.project);
        take(&mut self.location, &other.location);
        take(&mut self.log_level, &other.log_level);
    }

    #[must_use]
    pub fn discovery_options(&self) -> DiscoveryOptions {
        let defaults = DiscoveryOptions::default();
        DiscoveryOptions::new(
            self.data_dir.as_deref().map_or(defaults.root, PathBuf::from),
            self.extension.clone().unwrap_or(defaults.extension),
        )
    }

    #[must_use]
    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_BASE_MODEL.to_string())
    }

    #[must_use]
    pub fn epochs_or_default(&self) -> u32 {
        self.epochs.unwrap_or(DEFAULT_EPOCHS)
    }

    /// Environment (`GCP_PROJECT`/`GCP_LOCATION`) wins over the file.
    #[must_use]
    pub fn gcp_target(&self) -> Option<GcpTarget> {
        GcpTarget::from_env().or_else(|| {
            Some(GcpTarget { project: self.project.clone()?, location: self.location.clone()? })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config_content = r#"
data_dir = "datasets"
extension = "ndjson"
model = "gemini-2.0-flash-001"
epochs = 4
bucket = "tuning-data"
prefix = "support"
log_level = "debug"
"#;
        std::fs::write(&config_path, config_content).unwrap();

        let config = TunekitConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.data_dir, Some("datasets".to_string()));
        assert_eq!(config.epochs, Some(4));
        assert_eq!(config.bucket, Some("tuning-data".to_string()));

        let opts = config.discovery_options();
        assert_eq!(opts.root, PathBuf::from("datasets"));
        assert_eq!(opts.extension, "ndjson");
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(matches!(TunekitConfig::load_from_file(&missing), Err(ConfigError::NotFound(_))));

        let bad = temp_dir.path().join("bad.toml");
        std::fs::write(&bad, "epochs = \"many\"").unwrap();
        assert!(matches!(TunekitConfig::load_from_file(&bad), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_layers_reports_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("config.toml");
        let local = temp_dir.path().join(".tunekitrc");
        std::fs::write(&global, "bucket = \"global-bucket\"\n").unwrap();
        std::fs::write(&local, "epochs = [").unwrap();

        let (config, problems) =
            TunekitConfig::load_layers(&[global, local, temp_dir.path().join("missing.toml")]);
        assert_eq!(config.bucket, Some("global-bucket".to_string()));
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ConfigError::ParseError(_)));
    }

    #[test]
    fn test_merge() {
        let mut global = TunekitConfig {
            model: Some("base-a".to_string()),
            bucket: Some("global-bucket".to_string()),
            ..Default::default()
        };
        let local = TunekitConfig { model: Some("base-b".to_string()), epochs: Some(2), ..Default::default() };

        global.merge(&local);
        assert_eq!(global.model, Some("base-b".to_string()));
        assert_eq!(global.bucket, Some("global-bucket".to_string()));
        assert_eq!(global.epochs_or_default(), 2);
    }

    #[test]
    fn test_defaults() {
        let config = TunekitConfig::default();
        assert_eq!(config.discovery_options(), DiscoveryOptions::default());
        assert_eq!(config.model_or_default(), DEFAULT_BASE_MODEL);
        assert_eq!(config.epochs_or_default(), DEFAULT_EPOCHS);
    }
}
