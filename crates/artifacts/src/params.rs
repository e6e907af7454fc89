//! Persisted model parameters.
//!
//! The classifier itself lives in the `model` crate; this is just the
//! serialized form, tagged by model kind so the right classifier can be
//! built at startup.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, Result};
use crate::schema;

/// Parameters of the trained binary classifier, as persisted in `model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModelParams {
    /// Logistic regression; supports class probabilities.
    #[serde(rename = "logistic_regression")]
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },

    /// Linear SVM decision function; labels only, no probabilities.
    #[serde(rename = "linear_svm")]
    LinearSvm { weights: Vec<f64>, bias: f64 },
}

impl ModelParams {
    /// The coefficient vector, whatever the model kind.
    pub fn coefficients(&self) -> &[f64] {
        match self {
            ModelParams::LogisticRegression { coefficients, .. } => coefficients,
            ModelParams::LinearSvm { weights, .. } => weights,
        }
    }

    /// Human-readable model kind, for logs and the `inspect` command.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelParams::LogisticRegression { .. } => "logistic_regression",
            ModelParams::LinearSvm { .. } => "linear_svm",
        }
    }

    /// Check the coefficient vector spans the full feature schema.
    pub fn validate(&self) -> Result<()> {
        let found = self.coefficients().len();
        if found != schema::FEATURE_COUNT {
            return Err(ArtifactError::CoefficientCount {
                expected: schema::FEATURE_COUNT,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_deserialization() {
        let json = r#"{"kind": "logistic_regression", "coefficients": [0.5], "intercept": -1.0}"#;
        let params: ModelParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.kind(), "logistic_regression");
        assert_eq!(params.coefficients(), &[0.5]);
    }

    #[test]
    fn test_validate_checks_coefficient_count() {
        let params = ModelParams::LinearSvm {
            weights: vec![0.0; schema::FEATURE_COUNT],
            bias: 0.0,
        };
        assert!(params.validate().is_ok());

        let short = ModelParams::LinearSvm {
            weights: vec![0.0; 3],
            bias: 0.0,
        };
        assert!(matches!(
            short.validate().unwrap_err(),
            ArtifactError::CoefficientCount { expected: 19, found: 3 }
        ));
    }
}
