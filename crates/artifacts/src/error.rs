//! Error types for the artifacts crate.

use thiserror::Error;

/// Errors that can occur while loading or validating model artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Artifact file could not be found or opened
    #[error("Failed to open artifact file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact file contained malformed JSON
    #[error("Malformed JSON in {file}: {reason}")]
    MalformedJson { file: String, reason: String },

    /// A categorical column has no persisted encoder
    #[error("No encoder persisted for column '{column}'")]
    MissingEncoder { column: String },

    /// The encoder file names a column that is not in the schema
    #[error("Encoder persisted for unknown column '{column}'")]
    UnknownEncoderColumn { column: String },

    /// An encoder was persisted with no labels
    #[error("Encoder for column '{column}' has an empty label set")]
    EmptyLabelSet { column: String },

    /// Scaler columns don't match the schema's numeric columns
    #[error("Scaler fitted for columns {found:?}, expected {expected:?}")]
    ScalerColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Scaler parameter vectors have the wrong length
    #[error("Scaler expected {expected} {field} values but found {found}")]
    ScalerLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// A scale factor of zero would divide by zero at transform time
    #[error("Scaler has a zero scale factor for column '{column}'")]
    ZeroScale { column: String },

    /// Model coefficient vector doesn't span the full feature schema
    #[error("Model expected {expected} coefficients but found {found}")]
    CoefficientCount { expected: usize, found: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ArtifactError>;
