//! Tunekit Dataset
//!
//! Dataset primitives for managed fine-tuning pipelines:
//! - Validating JSONL datasets line by line (`validate`)
//! - Discovering dataset files under a data directory
//! - Reading tuning examples and summarising them (`dataset_stats`)
//! - Building tuning job requests for the remote API (`TuningJobSpec`)

pub mod config;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod report;
pub mod stats;
pub mod tuning;
pub mod validator;

pub use config::{ConfigError, TunekitConfig};
pub use dataset::{compute_dataset_id, Content, DatasetId, Part, SystemInstruction, TuningExample};
pub use discovery::{discover, DiscoveryOptions};
pub use error::{DatasetError, DatasetResult};
pub use report::{AggregateReport, FileDiagnostic, FileReport, LineOutcome, Status};
pub use stats::{dataset_stats, DatasetStats};
pub use tuning::{remote_dataset_uri, GcpTarget, TuningJobSpec};
pub use validator::{validate, validate_file, validate_reader};
