//! Request-shape normalization and column alignment.
//!
//! The first two pipeline stages: pull the "features" payload out of the
//! request body (wrapping a single row into a one-row batch), then check
//! every row's key set against the fixed 19-column schema.

use serde_json::Value;

use artifacts::schema;

use crate::error::{PredictError, Result};

/// One raw feature row, as received in the request body.
pub type RawRow = serde_json::Map<String, Value>;

/// JSON type name for error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize the request body into a batch of raw rows.
///
/// A single row object becomes a one-row batch. A missing or null
/// "features" key (or a non-object body) is `MissingInput`; a "features"
/// value that is neither an object nor an array of objects is a `Schema`
/// error.
pub fn extract_rows(body: &Value) -> Result<Vec<RawRow>> {
    let features = body
        .as_object()
        .and_then(|map| map.get("features"))
        .filter(|v| !v.is_null())
        .ok_or(PredictError::MissingInput)?;

    match features {
        Value::Object(row) => Ok(vec![row.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(row) => Ok(row.clone()),
                other => Err(PredictError::Schema {
                    reason: format!("row {} is not an object (found {})", i, json_type(other)),
                }),
            })
            .collect(),
        other => Err(PredictError::Schema {
            reason: format!(
                "'features' must be an object or an array of objects (found {})",
                json_type(other)
            ),
        }),
    }
}

/// Check one row's key set matches the schema exactly.
///
/// Missing and unexpected columns are both reported, in schema order and
/// input order respectively.
pub fn check_columns(index: usize, row: &RawRow) -> Result<()> {
    let missing: Vec<&str> = schema::INPUT_COLUMNS
        .into_iter()
        .filter(|c| !row.contains_key(*c))
        .collect();
    let extra: Vec<&str> = row
        .keys()
        .filter(|k| !schema::INPUT_COLUMNS.contains(&k.as_str()))
        .map(|k| k.as_str())
        .collect();

    if missing.is_empty() && extra.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing columns {:?}", missing));
    }
    if !extra.is_empty() {
        parts.push(format!("unexpected columns {:?}", extra));
    }
    Err(PredictError::Schema {
        reason: format!("row {}: {}", index, parts.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_row() -> Value {
        let mut row = serde_json::Map::new();
        for column in schema::INPUT_COLUMNS {
            row.insert(column.to_string(), json!("x"));
        }
        Value::Object(row)
    }

    #[test]
    fn test_missing_features_key() {
        let err = extract_rows(&json!({"featurs": {}})).unwrap_err();
        assert!(matches!(err, PredictError::MissingInput));

        // Non-object body is treated the same as a missing key
        let err = extract_rows(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, PredictError::MissingInput));

        // So is an explicit null
        let err = extract_rows(&json!({"features": null})).unwrap_err();
        assert!(matches!(err, PredictError::MissingInput));
    }

    #[test]
    fn test_single_row_becomes_batch_of_one() {
        let rows = extract_rows(&json!({"features": full_row()})).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_array_of_rows() {
        let rows = extract_rows(&json!({"features": [full_row(), full_row()]})).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_scalar_features_is_schema_error() {
        let err = extract_rows(&json!({"features": 42})).unwrap_err();
        assert!(matches!(err, PredictError::Schema { .. }));
        assert!(err.to_string().contains("Bad input shape/keys"));
    }

    #[test]
    fn test_non_object_batch_element() {
        let err = extract_rows(&json!({"features": [full_row(), "nope"]})).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 1"), "got: {}", message);
        assert!(message.contains("string"), "got: {}", message);
    }

    #[test]
    fn test_check_columns_accepts_exact_schema() {
        let rows = extract_rows(&json!({"features": full_row()})).unwrap();
        assert!(check_columns(0, &rows[0]).is_ok());
    }

    #[test]
    fn test_check_columns_reports_missing_and_extra() {
        let mut row = extract_rows(&json!({"features": full_row()})).unwrap().remove(0);
        row.remove("Contract");
        row.insert("contract".to_string(), json!("Month-to-month"));

        let err = check_columns(3, &row).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 3"), "got: {}", message);
        assert!(message.contains("missing columns [\"Contract\"]"), "got: {}", message);
        assert!(message.contains("unexpected columns [\"contract\"]"), "got: {}", message);
    }
}
