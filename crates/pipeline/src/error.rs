//! Error types for the inference pipeline.

use thiserror::Error;

use model::ModelError;

/// Errors the pipeline reports for one prediction request.
///
/// The first four variants are client-input errors and map to HTTP 400;
/// `Internal` indicates an artifact or environment fault and maps to 500.
#[derive(Error, Debug)]
pub enum PredictError {
    /// The request body had no top-level "features" key
    #[error("Missing 'features'")]
    MissingInput,

    /// A row was not an object, or its keys didn't match the schema
    #[error("Bad input shape/keys: {reason}")]
    Schema { reason: String },

    /// A categorical value was outside the column's known label set
    #[error("Invalid value for '{column}'. Allowed: {allowed:?}")]
    UnknownCategory {
        column: String,
        allowed: Vec<String>,
    },

    /// A numeric column value could not be coerced to a float
    #[error("Numeric transform failed: {reason}")]
    NumericTransform { reason: String },

    /// Model inference fault; not a client mistake
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PredictError {
    /// Whether this error is the caller's fault (HTTP 400) rather than
    /// a server-side fault (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PredictError::Internal(_))
    }
}

impl From<ModelError> for PredictError {
    fn from(err: ModelError) -> Self {
        PredictError::Internal(err.into())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PredictError>;
