//! # Artifacts Crate
//!
//! This crate handles the persisted training artifacts for the churn model.
//!
//! ## Main Components
//!
//! - **schema**: The fixed 19-column feature schema
//! - **encoders**: Per-column label encoders for the categorical fields
//! - **scaler**: The fitted standardization transform for the numeric fields
//! - **params**: Serialized classifier parameters
//! - **bundle**: Load everything once at startup from a directory of JSON files
//!
//! ## Example Usage
//!
//! ```ignore
//! use artifacts::ArtifactBundle;
//! use std::path::Path;
//!
//! // Load all artifacts at process start
//! let bundle = ArtifactBundle::load_from_dir(Path::new("model"))?;
//!
//! let encoder = bundle.encoders.get("Contract").unwrap();
//! println!("Contract labels: {:?}", encoder.classes());
//! ```

// Public modules
pub mod bundle;
pub mod encoders;
pub mod error;
pub mod params;
pub mod scaler;
pub mod schema;

// Re-export commonly used types for convenience
pub use bundle::ArtifactBundle;
pub use encoders::{EncoderSet, LabelEncoder};
pub use error::{ArtifactError, Result};
pub use params::ModelParams;
pub use scaler::StandardScaler;
pub use schema::{FEATURE_COUNT, INPUT_COLUMNS, NUMERIC_COLUMNS};
