//! Binary churn classifier built from persisted parameters.
//!
//! This crate provides the scoring seam of the service: a small `Classifier`
//! trait the pipeline calls with a fully transformed feature matrix, plus the
//! concrete linear models the training side persists. The model is loaded
//! once at startup and shared read-only across requests.

use thiserror::Error;
use tracing::info;

use artifacts::ModelParams;

/// Errors that can occur during model inference.
///
/// These indicate a bad artifact or a pipeline bug, never a client mistake;
/// the HTTP layer surfaces them as 500, not 400.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model expected {expected} features but row {row} has {found}")]
    FeatureCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A trained binary classifier over the transformed feature matrix.
///
/// `Send + Sync` so one boxed instance can serve concurrent requests.
pub trait Classifier: Send + Sync {
    /// Model kind, for logs and diagnostics.
    fn name(&self) -> &str;

    /// Predict a class index (0 or 1) per row.
    fn predict(&self, matrix: &[Vec<f64>]) -> Result<Vec<u8>, ModelError>;

    /// Positive-class probability per row, or `Ok(None)` if this model
    /// kind cannot produce probabilities.
    fn predict_proba(&self, matrix: &[Vec<f64>]) -> Result<Option<Vec<f64>>, ModelError>;
}

/// Build the concrete classifier for a set of persisted parameters.
///
/// The parameter dimensions were validated when the artifact was loaded.
pub fn from_params(params: &ModelParams) -> Box<dyn Classifier> {
    let classifier: Box<dyn Classifier> = match params {
        ModelParams::LogisticRegression {
            coefficients,
            intercept,
        } => Box::new(LogisticRegression {
            coefficients: coefficients.clone(),
            intercept: *intercept,
        }),
        ModelParams::LinearSvm { weights, bias } => Box::new(LinearSvm {
            weights: weights.clone(),
            bias: *bias,
        }),
    };
    info!("Built {} classifier", classifier.name());
    classifier
}

/// Logistic regression: sigmoid of a linear score, threshold at 0.5.
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Linear SVM decision function: sign of a linear score, no probabilities.
pub struct LinearSvm {
    weights: Vec<f64>,
    bias: f64,
}

/// Dot product of one row against the coefficient vector.
fn linear_score(
    row: &[f64],
    index: usize,
    coefficients: &[f64],
    intercept: f64,
) -> Result<f64, ModelError> {
    if row.len() != coefficients.len() {
        return Err(ModelError::FeatureCount {
            row: index,
            expected: coefficients.len(),
            found: row.len(),
        });
    }
    let dot: f64 = row.iter().zip(coefficients).map(|(x, w)| x * w).sum();
    Ok(dot + intercept)
}

fn sigmoid(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

impl LogisticRegression {
    fn scores(&self, matrix: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        matrix
            .iter()
            .enumerate()
            .map(|(i, row)| linear_score(row, i, &self.coefficients, self.intercept))
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn predict(&self, matrix: &[Vec<f64>]) -> Result<Vec<u8>, ModelError> {
        Ok(self
            .scores(matrix)?
            .into_iter()
            .map(|s| u8::from(sigmoid(s) >= 0.5))
            .collect())
    }

    fn predict_proba(&self, matrix: &[Vec<f64>]) -> Result<Option<Vec<f64>>, ModelError> {
        let probabilities = self.scores(matrix)?.into_iter().map(sigmoid).collect();
        Ok(Some(probabilities))
    }
}

impl Classifier for LinearSvm {
    fn name(&self) -> &str {
        "linear_svm"
    }

    fn predict(&self, matrix: &[Vec<f64>]) -> Result<Vec<u8>, ModelError> {
        matrix
            .iter()
            .enumerate()
            .map(|(i, row)| {
                linear_score(row, i, &self.weights, self.bias).map(|s| u8::from(s > 0.0))
            })
            .collect()
    }

    fn predict_proba(&self, _matrix: &[Vec<f64>]) -> Result<Option<Vec<f64>>, ModelError> {
        Ok(None)
    }
}
