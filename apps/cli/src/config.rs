//! CLI configuration loading and merging.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tunekit_dataset::{ConfigError, DiscoveryOptions, TunekitConfig};

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap)
/// 2. Environment variables (GCP_PROJECT, GCP_LOCATION)
/// 3. Explicit `--config` file, or local config file (./.tunekitrc)
/// 4. Global config file (~/.tunekit/config.toml)
/// 5. Defaults
///
/// An explicit file must load. Discovered files that fail to load are skipped
/// and returned so they can be logged once tracing is initialised.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(TunekitConfig, Vec<ConfigError>)> {
    match explicit {
        Some(path) => {
            let config = TunekitConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok((config, Vec::new()))
        }
        None => Ok(TunekitConfig::discover_and_load()),
    }
}

/// Discovery settings with CLI flags applied over the config file.
pub fn discovery_options(
    config: &TunekitConfig,
    data_dir: Option<PathBuf>,
    extension: Option<String>,
) -> DiscoveryOptions {
    let base = config.discovery_options();
    DiscoveryOptions::new(data_dir.unwrap_or(base.root), extension.unwrap_or(base.extension))
}
