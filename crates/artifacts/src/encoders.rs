//! Label encoders for the categorical columns.
//!
//! Each encoder is an ordered label list fixed at training time; a label's
//! code is its index in that list. The label set is persisted alongside the
//! codes so unknown-value errors can enumerate the allowed values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, Result};
use crate::schema;

/// Deterministic mapping from categorical label to integer code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Create an encoder for `column` with the given ordered label set.
    pub fn new(column: impl Into<String>, classes: Vec<String>) -> Self {
        Self {
            column: column.into(),
            classes,
        }
    }

    /// The column this encoder was fitted for.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The ordered label set fixed at training time.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Map a label to its integer code, or `None` if the label is unknown.
    pub fn transform(&self, label: &str) -> Option<u32> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| i as u32)
    }
}

/// All per-column encoders, resolved once at startup.
///
/// Lookup is by exact column name. The constructor guarantees exactly one
/// encoder per categorical schema column, so `get` on a categorical column
/// never fails after construction.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    by_column: HashMap<String, LabelEncoder>,
}

impl EncoderSet {
    /// Build the encoder set, validating it against the schema.
    ///
    /// Fails if a categorical column has no encoder, if an encoder names a
    /// column outside the schema, or if any label set is empty.
    pub fn new(encoders: Vec<LabelEncoder>) -> Result<Self> {
        let mut by_column = HashMap::with_capacity(encoders.len());
        for encoder in encoders {
            if !schema::INPUT_COLUMNS.contains(&encoder.column())
                || schema::is_numeric(encoder.column())
            {
                return Err(ArtifactError::UnknownEncoderColumn {
                    column: encoder.column().to_string(),
                });
            }
            if encoder.classes().is_empty() {
                return Err(ArtifactError::EmptyLabelSet {
                    column: encoder.column().to_string(),
                });
            }
            by_column.insert(encoder.column().to_string(), encoder);
        }
        for column in schema::categorical_columns() {
            if !by_column.contains_key(column) {
                return Err(ArtifactError::MissingEncoder {
                    column: column.to_string(),
                });
            }
        }
        Ok(Self { by_column })
    }

    /// Look up the encoder for a column by exact name.
    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.by_column.get(column)
    }

    /// Number of encoders (one per categorical column).
    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no(column: &str) -> LabelEncoder {
        LabelEncoder::new(column, vec!["No".to_string(), "Yes".to_string()])
    }

    /// One encoder per categorical column, minimal label sets.
    fn full_encoder_list() -> Vec<LabelEncoder> {
        schema::categorical_columns().map(yes_no).collect()
    }

    #[test]
    fn test_transform_known_label() {
        let encoder = yes_no("Partner");
        assert_eq!(encoder.transform("No"), Some(0));
        assert_eq!(encoder.transform("Yes"), Some(1));
    }

    #[test]
    fn test_transform_unknown_label() {
        let encoder = yes_no("Partner");
        assert_eq!(encoder.transform("Maybe"), None);
        // Lookup is exact, not case-insensitive
        assert_eq!(encoder.transform("yes"), None);
    }

    #[test]
    fn test_encoder_set_complete() {
        let set = EncoderSet::new(full_encoder_list()).unwrap();
        assert_eq!(set.len(), 16);
        assert!(set.get("Contract").is_some());
        assert!(set.get("tenure").is_none());
    }

    #[test]
    fn test_encoder_set_rejects_missing_column() {
        let mut encoders = full_encoder_list();
        encoders.retain(|e| e.column() != "Contract");
        let err = EncoderSet::new(encoders).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingEncoder { column } if column == "Contract"));
    }

    #[test]
    fn test_encoder_set_rejects_numeric_column() {
        let mut encoders = full_encoder_list();
        encoders.push(yes_no("tenure"));
        let err = EncoderSet::new(encoders).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownEncoderColumn { .. }));
    }
}
