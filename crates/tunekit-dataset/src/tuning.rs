//! Tuning job request construction.
//!
//! Nothing here talks to the network. The CLI prints the request so an
//! upstream pipeline step can submit it.

use crate::dataset::DatasetId;
use crate::error::{DatasetError, DatasetResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_BASE_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_EPOCHS: u32 = 3;

/// Project and region hosting the tuning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpTarget {
    pub project: String,
    pub location: String,
}

impl GcpTarget {
    /// Read `GCP_PROJECT` and `GCP_LOCATION`. Returns `None` unless both are set and non-blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let project = std::env::var("GCP_PROJECT").ok().filter(|v| !v.trim().is_empty())?;
        let location = std::env::var("GCP_LOCATION").ok().filter(|v| !v.trim().is_empty())?;
        Some(Self { project, location })
    }

    #[must_use]
    pub fn tuning_jobs_endpoint(&self) -> String {
        format!(
            "https://{loc}-aiplatform.googleapis.com/v1/projects/{project}/locations/{loc}/tuningJobs",
            loc = self.location,
            project = self.project,
        )
    }
}

/// Versioned object path for an uploaded dataset:
/// `gs://{bucket}/{prefix}/{short id}/{file_name}`. An empty prefix is omitted.
#[must_use]
pub fn remote_dataset_uri(bucket: &str, prefix: &str, dataset_id: &DatasetId, file_name: &str) -> String {
    let bucket = bucket.trim_start_matches("gs://").trim_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("gs://{bucket}/{}/{file_name}", dataset_id.short())
    } else {
        format!("gs://{bucket}/{prefix}/{}/{file_name}", dataset_id.short())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningJobSpec {
    pub base_model: String,
    pub epochs: u32,
    pub training_dataset_uri: String,
    pub validation_dataset_uri: Option<String>,
    pub learning_rate_multiplier: Option<f64>,
    pub display_name: Option<String>,
}

impl TuningJobSpec {
    #[must_use]
    pub fn new(training_dataset_uri: impl Into<String>) -> Self {
        Self {
            base_model: DEFAULT_BASE_MODEL.to_string(),
            epochs: DEFAULT_EPOCHS,
            training_dataset_uri: training_dataset_uri.into(),
            validation_dataset_uri: None,
            learning_rate_multiplier: None,
            display_name: None,
        }
    }

    pub fn validate(&self) -> DatasetResult<()> {
        if self.base_model.trim().is_empty() {
            return Err(DatasetError::InvalidSpec("base_model is required".to_string()));
        }
        if self.epochs == 0 {
            return Err(DatasetError::InvalidSpec("epochs must be >= 1".to_string()));
        }
        if !self.training_dataset_uri.starts_with("gs://") {
            return Err(DatasetError::InvalidSpec(format!(
                "training dataset must be a gs:// URI, got {}",
                self.training_dataset_uri
            )));
        }
        if let Some(uri) = &self.validation_dataset_uri {
            if !uri.starts_with("gs://") {
                return Err(DatasetError::InvalidSpec(format!("validation dataset must be a gs:// URI, got {uri}")));
            }
        }
        if let Some(m) = self.learning_rate_multiplier {
            if !m.is_finite() || m <= 0.0 {
                return Err(DatasetError::InvalidSpec("learning_rate_multiplier must be > 0".to_string()));
            }
        }
        Ok(())
    }

    /// JSON body for `POST .../tuningJobs`. Validates first.
    pub fn request_body(&self) -> DatasetResult<serde_json::Value> {
        self.validate()?;

        let mut hyper = json!({ "epochCount": self.epochs });
        if let Some(m) = self.learning_rate_multiplier {
            hyper["learningRateMultiplier"] = json!(m);
        }

        let mut spec = json!({
            "trainingDatasetUri": self.training_dataset_uri,
            "hyperParameters": hyper,
        });
        if let Some(uri) = &self.validation_dataset_uri {
            spec["validationDatasetUri"] = json!(uri);
        }

        let mut body = json!({
            "baseModel": self.base_model,
            "supervisedTuningSpec": spec,
        });
        if let Some(name) = &self.display_name {
            body["tunedModelDisplayName"] = json!(name);
        }
        Ok(body)
    }
}
