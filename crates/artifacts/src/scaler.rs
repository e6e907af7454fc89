//! The fitted numeric scaler.
//!
//! Standardization `(x - mean) / scale` fitted jointly over the three numeric
//! columns at training time. Means and scales are persisted in the same order
//! as `schema::NUMERIC_COLUMNS`.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, Result};
use crate::schema;

/// Fitted standardization transform over the numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler, validating the fitted columns against the schema.
    pub fn new(columns: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let expected: Vec<String> = schema::NUMERIC_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        if columns != expected {
            return Err(ArtifactError::ScalerColumnMismatch {
                expected,
                found: columns,
            });
        }
        if mean.len() != columns.len() {
            return Err(ArtifactError::ScalerLengthMismatch {
                field: "mean",
                expected: columns.len(),
                found: mean.len(),
            });
        }
        if scale.len() != columns.len() {
            return Err(ArtifactError::ScalerLengthMismatch {
                field: "scale",
                expected: columns.len(),
                found: scale.len(),
            });
        }
        if let Some(i) = scale.iter().position(|s| *s == 0.0) {
            return Err(ArtifactError::ZeroScale {
                column: columns[i].clone(),
            });
        }
        Ok(Self {
            columns,
            mean,
            scale,
        })
    }

    /// The numeric columns this scaler was fitted on, in fitting order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Apply the fitted transform to one row of raw numeric values.
    ///
    /// `values` must be in `NUMERIC_COLUMNS` order; the constructor guarantees
    /// the parameter vectors line up.
    pub fn transform(&self, values: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, value) in values.into_iter().enumerate() {
            out[i] = (value - self.mean[i]) / self.scale[i];
        }
        out
    }
}
