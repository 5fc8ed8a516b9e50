//! Tuning request command.
//!
//! Runs the validation gate on one dataset and, if it passes, prints where the
//! dataset should be uploaded and the tuning job body to submit.

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use tunekit_dataset::{remote_dataset_uri, TuningJobSpec, TunekitConfig};

use super::output;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Dataset file (default: <data dir>/training.jsonl)
    pub path: Option<String>,

    /// Storage bucket the dataset is uploaded to
    #[arg(long)]
    pub bucket: Option<String>,

    /// Object prefix inside the bucket
    #[arg(long)]
    pub prefix: Option<String>,

    /// Base model to tune
    #[arg(long)]
    pub model: Option<String>,

    /// Number of training epochs
    #[arg(long)]
    pub epochs: Option<u32>,

    /// Learning rate multiplier
    #[arg(long)]
    pub learning_rate_multiplier: Option<f64>,

    /// Display name for the tuned model (default: <file stem>-<timestamp>)
    #[arg(long)]
    pub display_name: Option<String>,

    /// Already-uploaded validation dataset (gs://...)
    #[arg(long)]
    pub validation_uri: Option<String>,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}

fn default_display_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("dataset");
    format!("{}-{}", stem, Utc::now().format("%Y%m%d%H%M%S"))
}

pub async fn execute(args: RequestArgs, config: &TunekitConfig) -> anyhow::Result<()> {
    let path = super::stats::resolve_dataset_path(args.path, config);

    let bucket = args
        .bucket
        .or_else(|| config.bucket.clone())
        .context("A bucket is required: pass --bucket or set `bucket` in the config file")?;
    let prefix = args.prefix.or_else(|| config.prefix.clone()).unwrap_or_default();

    // Gate: nothing is prepared for a dataset that fails validation.
    let gate_path = path.clone();
    let report = tokio::task::spawn_blocking(move || tunekit_dataset::validate_file(&gate_path))
        .await
        .context("Validation task panicked")?;
    if !report.status().is_passed() {
        eprintln!("{}", "Dataset failed validation; refusing to prepare a tuning request.".red().bold());
        output::print_file(&report);
        std::process::exit(1);
    }

    let dataset_id = tunekit_dataset::compute_dataset_id(&path)
        .with_context(|| format!("Failed to hash dataset {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Dataset path has no file name")?;
    let dataset_uri = remote_dataset_uri(&bucket, &prefix, &dataset_id, file_name);

    let spec = TuningJobSpec {
        base_model: args.model.unwrap_or_else(|| config.model_or_default()),
        epochs: args.epochs.unwrap_or_else(|| config.epochs_or_default()),
        training_dataset_uri: dataset_uri.clone(),
        validation_dataset_uri: args.validation_uri,
        learning_rate_multiplier: args.learning_rate_multiplier,
        display_name: Some(args.display_name.unwrap_or_else(|| default_display_name(&path))),
    };
    let body = spec.request_body().context("Invalid tuning job parameters")?;
    let endpoint = config.gcp_target().map(|t| t.tuning_jobs_endpoint());

    tracing::info!(dataset = %path.display(), dataset_id = %dataset_id, uri = %dataset_uri, "Prepared tuning request");

    if args.json {
        let plan = json!({
            "dataset": path.display().to_string(),
            "dataset_id": dataset_id.0,
            "records": report.valid_count(),
            "upload_uri": dataset_uri,
            "endpoint": endpoint,
            "body": body,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!();
    println!("{}", "Tuning request".bold().cyan());
    println!("  Dataset:  {} ({} records)", path.display(), report.valid_count());
    println!("  Version:  {}", dataset_id.short().dimmed());
    println!("  Upload:   {}", dataset_uri.cyan());
    match &endpoint {
        Some(url) => println!("  Endpoint: POST {}", url.cyan()),
        None => println!(
            "  Endpoint: {}",
            "unknown (set GCP_PROJECT and GCP_LOCATION, or project/location in the config file)".dimmed()
        ),
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&body)?);
    println!();
    Ok(())
}
