//! Tunekit CLI - dataset gate for managed fine-tuning pipelines
//!
//! Provides a `tunekit` command that validates JSONL training datasets,
//! summarises them, and prepares tuning job requests for a pipeline to submit.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{request, stats, validate};

/// Tunekit - validate and package fine-tuning datasets
#[derive(Parser, Debug)]
#[command(
    name = "tunekit",
    author,
    version,
    about = "Tunekit - validate and package fine-tuning datasets",
    long_about = "Tunekit checks that JSONL training datasets are well formed before they are uploaded,\nand prepares the tuning job request that a CI pipeline submits afterwards."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file (overrides ~/.tunekit/config.toml and ./.tunekitrc)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate JSONL datasets
    ///
    /// Checks that every non-blank line of each file is a standalone JSON value.
    /// With no paths, every matching file under the data directory is checked.
    /// Exits non-zero if any file fails.
    Validate {
        /// Dataset files to validate
        paths: Vec<PathBuf>,

        /// Directory searched when no paths are given (default: data)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// File extension searched when no paths are given (default: jsonl)
        #[arg(long)]
        extension: Option<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarise a tuning dataset
    ///
    /// Counts examples and training text, and scales the volume by the epoch count.
    Stats {
        /// Dataset file (default: <data dir>/training.jsonl)
        path: Option<String>,

        /// Epochs to scale the training volume by
        #[arg(long)]
        epochs: Option<u32>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prepare a tuning job request for a validated dataset
    ///
    /// Validates the dataset, derives its versioned storage path, and prints the
    /// request body for the tuning API. Nothing is uploaded or submitted.
    Request(request::RequestArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (cli_config, config_problems) = config::load_config(args.config.as_deref())?;

    // Initialize tracing
    let level = match args.log_level.as_deref().or(cli_config.log_level.as_deref()).unwrap_or("info") {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    for problem in &config_problems {
        tracing::warn!(error = %problem, "Ignoring configuration file");
    }

    match args.command {
        Command::Validate { paths, data_dir, extension, json } => {
            let discovery = config::discovery_options(&cli_config, data_dir, extension);
            validate::execute(paths, discovery, json).await?;
        }
        Command::Stats { path, epochs, json } => {
            stats::execute(path, epochs, json, &cli_config).await?;
        }
        Command::Request(request_args) => {
            request::execute(request_args, &cli_config).await?;
        }
    }

    Ok(())
}
