use std::path::PathBuf;
use thiserror::Error;

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// No paths were given and discovery found nothing to validate.
    #[error("no dataset files found: nothing matching *.{extension} under {}", .root.display())]
    NoInput { root: PathBuf, extension: String },

    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid tuning job spec: {0}")]
    InvalidSpec(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
