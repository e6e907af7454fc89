//! Inference pipeline for the churn prediction service.
//!
//! This crate provides:
//! - Request-shape normalization and column alignment
//! - Categorical encoding and numeric scaling against the loaded artifacts
//! - Classifier invocation and label mapping
//! - The client-error taxonomy surfaced by the HTTP layer
//!
//! ## Architecture
//! A request flows through fixed stages, each of which can fail with a
//! client-input error:
//! 1. Shape normalization (missing "features" key)
//! 2. Column alignment (missing/extra keys)
//! 3. Categorical encoding (unknown label)
//! 4. Numeric scaling (non-numeric value)
//! 5. Prediction and label mapping
//!
//! ## Example Usage
//! ```ignore
//! use artifacts::ArtifactBundle;
//! use pipeline::InferencePipeline;
//! use std::sync::Arc;
//!
//! let bundle = Arc::new(ArtifactBundle::load_from_dir("model".as_ref())?);
//! let pipeline = InferencePipeline::new(bundle);
//!
//! let outcome = pipeline.predict_value(&body)?;
//! println!("{:?}", outcome.predictions);
//! ```

pub mod error;
pub mod inference;
pub mod rows;

// Re-export main types
pub use error::{PredictError, Result};
pub use inference::{InferencePipeline, Prediction, LABEL_CHURN, LABEL_NO_CHURN};
pub use rows::RawRow;
