//! Dataset statistics command.

use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;
use tunekit_dataset::TunekitConfig;

const DEFAULT_DATASET_FILE: &str = "training.jsonl";

/// Resolve the dataset path; a missing or blank argument falls back to
/// `<data dir>/training.jsonl`.
pub fn resolve_dataset_path(path: Option<String>, config: &TunekitConfig) -> PathBuf {
    match path {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => config.discovery_options().root.join(DEFAULT_DATASET_FILE),
    }
}

pub async fn execute(path: Option<String>, epochs: Option<u32>, json: bool, config: &TunekitConfig) -> anyhow::Result<()> {
    let path = resolve_dataset_path(path, config);
    let epochs = epochs.unwrap_or_else(|| config.epochs_or_default());

    let stats = tunekit_dataset::dataset_stats(&path, epochs)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;

    if json {
        let mut value = serde_json::to_value(&stats)?;
        value["characters_for_epochs"] = serde_json::json!(stats.characters_for_epochs());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("{}", "Dataset statistics".bold().cyan());
    println!("{}", "─".repeat(42));
    println!("  File:            {}", stats.path.display());
    println!("  Examples:        {}", stats.examples.to_string().green());
    println!("  Text segments:   {}", stats.text_segments);
    println!("  Characters:      {}", stats.characters);
    println!("  Characters ({} epochs): {}", stats.epochs, stats.characters_for_epochs());
    if !stats.skipped_lines.is_empty() {
        let lines: Vec<String> = stats.skipped_lines.iter().map(ToString::to_string).collect();
        println!(
            "  {} {} line(s) skipped: {}",
            "!".yellow().bold(),
            stats.skipped_lines.len(),
            lines.join(", ").dimmed()
        );
        println!("  {}", "Run `tunekit validate` to see parser diagnostics.".dimmed());
    }
    println!("{}", "─".repeat(42));
    println!();
    Ok(())
}
