//! Dataset loading errors. All of them are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataLoadError>;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset contains no usable rows")]
    Empty,
}
