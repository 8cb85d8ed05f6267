//! Questionnaire-to-feature-vector encoding.
//!
//! Maps imputed questionnaire answers onto the exact column space the
//! classifier was trained on: one-hot encoding with the training-time
//! drop-first basis, then reindexing against the stored feature-name
//! list.

pub mod encoder;
pub mod schema;

pub use encoder::FeatureEncoder;
pub use schema::{CategoricalField, CATEGORICAL_FIELDS, NUMERIC_FIELDS};
