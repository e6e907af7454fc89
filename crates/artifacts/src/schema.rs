//! The fixed feature schema for the churn model.
//!
//! The model was trained on 19 columns in a fixed order; every request row
//! must be aligned to this order before encoding and scaling. Three columns
//! are numeric and go through the scaler, the other sixteen are categorical
//! and go through per-column label encoders.

/// All input columns, in the exact order the model was trained on.
pub const INPUT_COLUMNS: [&str; 19] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
];

/// The columns the scaler was fitted on, in fitting order.
pub const NUMERIC_COLUMNS: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];

/// Number of input columns.
pub const FEATURE_COUNT: usize = INPUT_COLUMNS.len();

/// Whether `column` is one of the scaled numeric columns.
pub fn is_numeric(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
}

/// The categorical columns, in schema order.
pub fn categorical_columns() -> impl Iterator<Item = &'static str> {
    INPUT_COLUMNS.into_iter().filter(|c| !is_numeric(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_counts() {
        assert_eq!(FEATURE_COUNT, 19);
        assert_eq!(categorical_columns().count(), 16);
    }

    #[test]
    fn test_numeric_columns_are_in_schema() {
        for col in NUMERIC_COLUMNS {
            assert!(INPUT_COLUMNS.contains(&col), "{} missing from schema", col);
        }
    }

    #[test]
    fn test_senior_citizen_is_categorical() {
        // Encoded 0/1 in the training data, but label-encoded, not scaled.
        assert!(!is_numeric("SeniorCitizen"));
        assert!(is_numeric("tenure"));
    }
}
