//! # Inference Pipeline
//!
//! This module coordinates the prediction path:
//! 1. Normalize the request shape into a batch of raw rows
//! 2. Align each row against the fixed column schema
//! 3. Encode the categorical columns
//! 4. Coerce and scale the numeric columns
//! 5. Run the classifier over the transformed matrix
//! 6. Map class indices to labels
//!
//! The pipeline is pure computation over the artifacts loaded at startup:
//! no I/O, no shared mutable state, identical input gives identical output.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use artifacts::{schema, ArtifactBundle};
use model::Classifier;

use crate::error::{PredictError, Result};
use crate::rows::{self, RawRow};

/// Label for the positive (churn) class.
pub const LABEL_CHURN: &str = "Churn";
/// Label for the negative class.
pub const LABEL_NO_CHURN: &str = "No Churn";

/// Result of one prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// One label per input row, order preserved.
    pub predictions: Vec<String>,
    /// Positive-class probability per row, `None` if the model kind
    /// cannot produce probabilities.
    pub probabilities: Option<Vec<f64>>,
}

/// The request-to-prediction pipeline.
///
/// Holds the loaded artifacts and the classifier built from them; both are
/// read-only, so one pipeline serves concurrent requests without locking.
pub struct InferencePipeline {
    bundle: Arc<ArtifactBundle>,
    classifier: Box<dyn Classifier>,
}

impl InferencePipeline {
    /// Build the pipeline from a loaded artifact bundle.
    pub fn new(bundle: Arc<ArtifactBundle>) -> Self {
        let classifier = model::from_params(&bundle.model);
        Self { bundle, classifier }
    }

    /// Model kind, for logs and diagnostics.
    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Run the full pipeline on a raw request body.
    pub fn predict_value(&self, body: &Value) -> Result<Prediction> {
        let rows = rows::extract_rows(body)?;
        self.predict_rows(&rows)
    }

    /// Run the pipeline on an already-extracted batch of rows.
    ///
    /// A single invalid row fails the whole batch; there is no partial
    /// success.
    pub fn predict_rows(&self, rows: &[RawRow]) -> Result<Prediction> {
        let start_time = Instant::now();

        for (index, row) in rows.iter().enumerate() {
            rows::check_columns(index, row)?;
        }
        debug!(
            "Aligned {} rows to {} columns",
            rows.len(),
            schema::FEATURE_COUNT
        );

        // Collect per-row results first so the lowest-index error wins;
        // collecting straight into a Result would leave the reported error
        // unspecified when several rows are invalid.
        let transformed: Vec<Result<Vec<f64>>> = rows
            .par_iter()
            .map(|row| self.transform_row(row))
            .collect();
        let mut matrix = Vec::with_capacity(transformed.len());
        for result in transformed {
            matrix.push(result?);
        }
        debug!("Encoded and scaled {} rows", matrix.len());

        let classes = self.classifier.predict(&matrix)?;
        let probabilities = self.classifier.predict_proba(&matrix)?;

        let predictions: Vec<String> = classes
            .into_iter()
            .map(|class| {
                if class == 0 {
                    LABEL_NO_CHURN.to_string()
                } else {
                    LABEL_CHURN.to_string()
                }
            })
            .collect();

        info!(
            "Predicted {} rows with {} in {:.2?}",
            predictions.len(),
            self.classifier.name(),
            start_time.elapsed()
        );
        Ok(Prediction {
            predictions,
            probabilities,
        })
    }

    /// Transform one aligned row into a model-ready feature vector.
    ///
    /// Categorical encoding runs before numeric coercion, so a row that is
    /// invalid in both ways reports the categorical error.
    fn transform_row(&self, row: &RawRow) -> Result<Vec<f64>> {
        let mut codes: HashMap<&str, f64> = HashMap::with_capacity(16);
        for column in schema::categorical_columns() {
            codes.insert(column, self.encode_value(column, field(row, column)?)?);
        }

        let mut raw = [0.0; 3];
        for (i, column) in schema::NUMERIC_COLUMNS.into_iter().enumerate() {
            raw[i] = numeric_value(column, field(row, column)?)?;
        }
        let scaled = self.bundle.scaler.transform(raw);

        let vector = schema::INPUT_COLUMNS
            .into_iter()
            .map(|column| {
                match schema::NUMERIC_COLUMNS.iter().position(|c| *c == column) {
                    Some(i) => scaled[i],
                    None => codes[column],
                }
            })
            .collect();
        Ok(vector)
    }

    /// Encode one categorical value to its integer code.
    fn encode_value(&self, column: &str, value: &Value) -> Result<f64> {
        let encoder = self
            .bundle
            .encoders
            .get(column)
            .ok_or_else(|| anyhow!("no encoder for column '{}'", column))?;

        categorical_label(value)
            .and_then(|label| encoder.transform(&label))
            .map(f64::from)
            .ok_or_else(|| PredictError::UnknownCategory {
                column: column.to_string(),
                allowed: encoder.classes().to_vec(),
            })
    }
}

/// Fetch a column from an aligned row. Alignment has already verified the
/// key exists, so a miss is an internal fault.
fn field<'a>(row: &'a RawRow, column: &str) -> Result<&'a Value> {
    row.get(column)
        .ok_or_else(|| PredictError::Internal(anyhow!("aligned row lost column '{}'", column)))
}

/// Categorical lookup key for a JSON value.
///
/// Numbers go through their canonical rendering so integer-coded columns
/// like SeniorCitizen accept `0` as well as `"0"`.
fn categorical_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce one numeric column value to f64.
///
/// Non-finite parses ("NaN", "inf") are rejected; they would otherwise
/// flow through the scaler and come out as probabilities outside [0,1].
fn numeric_value(column: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| PredictError::NumericTransform {
            reason: format!("could not convert value {} for '{}' to float", value, column),
        })
}
