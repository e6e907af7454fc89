//! Loading the persisted training artifacts.
//!
//! The bundle is loaded once at process start and is read-only afterwards;
//! callers hold it behind an `Arc` and pass it explicitly into the pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::encoders::{EncoderSet, LabelEncoder};
use crate::error::{ArtifactError, Result};
use crate::params::ModelParams;
use crate::scaler::StandardScaler;

/// File names expected inside the artifact directory.
pub const ENCODERS_FILE: &str = "encoders.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "model.json";

/// On-disk shape of `scaler.json`.
#[derive(Deserialize)]
struct ScalerFile {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Everything the pipeline needs from training: encoders, scaler, model.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub encoders: EncoderSet,
    pub scaler: StandardScaler,
    pub model: ModelParams,
}

impl ArtifactBundle {
    /// Assemble a bundle from already-built parts, validating the model.
    ///
    /// Used directly in tests; production code goes through `load_from_dir`.
    pub fn new(encoders: EncoderSet, scaler: StandardScaler, model: ModelParams) -> Result<Self> {
        model.validate()?;
        Ok(Self {
            encoders,
            scaler,
            model,
        })
    }

    /// Load and validate all artifacts from a directory.
    ///
    /// Expects `encoders.json` (column name -> ordered label list),
    /// `scaler.json` (fitted columns, means, scales) and `model.json`
    /// (tagged classifier parameters).
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let labels: BTreeMap<String, Vec<String>> = read_json(dir, ENCODERS_FILE)?;
        let encoders = EncoderSet::new(
            labels
                .into_iter()
                .map(|(column, classes)| LabelEncoder::new(column, classes))
                .collect(),
        )?;

        let scaler_file: ScalerFile = read_json(dir, SCALER_FILE)?;
        let scaler = StandardScaler::new(scaler_file.columns, scaler_file.mean, scaler_file.scale)?;

        let model: ModelParams = read_json(dir, MODEL_FILE)?;

        Self::new(encoders, scaler, model)
    }
}

/// Read and deserialize one artifact file.
fn read_json<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(ArtifactError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = fs::read_to_string(&path)?;
    serde_json::from_str(&text).map_err(|e| ArtifactError::MalformedJson {
        file: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use std::fs;

    fn write_artifacts(dir: &Path) {
        let labels: BTreeMap<&str, Vec<&str>> = schema::categorical_columns()
            .map(|c| (c, vec!["No", "Yes"]))
            .collect();
        fs::write(
            dir.join(ENCODERS_FILE),
            serde_json::to_string(&labels).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            r#"{"columns": ["tenure", "MonthlyCharges", "TotalCharges"],
                "mean": [32.0, 64.0, 2280.0], "scale": [24.0, 30.0, 2266.0]}"#,
        )
        .unwrap();
        let coefficients: Vec<f64> = vec![0.1; schema::FEATURE_COUNT];
        fs::write(
            dir.join(MODEL_FILE),
            serde_json::to_string(&serde_json::json!({
                "kind": "logistic_regression",
                "coefficients": coefficients,
                "intercept": -0.5,
            }))
            .unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());

        let bundle = ArtifactBundle::load_from_dir(dir.path()).unwrap();
        assert_eq!(bundle.encoders.len(), 16);
        assert_eq!(bundle.scaler.columns(), schema::NUMERIC_COLUMNS);
        assert_eq!(bundle.model.kind(), "logistic_regression");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactBundle::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join(MODEL_FILE), "{not json").unwrap();

        let err = ArtifactBundle::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedJson { file, .. } if file == MODEL_FILE));
    }

    #[test]
    fn test_model_dimension_checked_on_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(
            dir.path().join(MODEL_FILE),
            r#"{"kind": "linear_svm", "weights": [1.0, 2.0], "bias": 0.0}"#,
        )
        .unwrap();

        let err = ArtifactBundle::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::CoefficientCount { .. }));
    }
}
