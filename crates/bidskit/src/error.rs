//! Error types for the bidskit library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::EntityKey;

/// Main error type for bidskit operations.
#[derive(Debug, Error)]
pub enum BidsError {
    /// Entity key not present in the schema.
    #[error("Unknown entity '{key}' (allowed: {})", EntityKey::allowed_short_names())]
    InvalidEntity { key: String },

    /// Entity value is empty, contains a reserved character, or is not a valid index.
    #[error("Invalid value '{value}' for entity '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// File name does not follow the `key-value_..._suffix.ext` layout.
    #[error("Malformed file name '{name}': {reason}")]
    MalformedName { name: String, reason: String },

    /// Suffix is empty, contains a reserved character, or is not recognized.
    #[error("Invalid suffix '{suffix}': {reason}")]
    InvalidSuffix { suffix: String, reason: String },

    /// Extension is malformed or not recognized.
    #[error("Invalid extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    /// Datatype directory name not recognized.
    #[error("Invalid datatype '{0}'")]
    InvalidDatatype(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV library while reading or writing TSV files.
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Sidecar file is missing or does not have the expected shape.
    #[error("Sidecar error: {0}")]
    Sidecar(String),

    /// Channel name not listed in a channels.tsv file.
    #[error("Channel '{channel}' not found in '{path}'")]
    UnknownChannel { channel: String, path: PathBuf },

    /// Arguments that are individually valid but inconsistent together.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BidsError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BidsError::Io { path, source }
    }
}

/// Result type alias for bidskit operations.
pub type Result<T> = std::result::Result<T, BidsError>;
