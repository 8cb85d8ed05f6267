//! Embedded classifier backend.
//!
//! Runs the trained scikit-learn artifact inside the process via PyO3:
//! `joblib.load` once at startup, `predict_proba` per request. The
//! artifact and its feature-name list are immutable for the process
//! lifetime. When the artifact is absent the server keeps running and
//! every assessment fails fast with `ModelUnavailable`.

mod classifier;

pub use classifier::EmbeddedClassifier;

/// Paths to the trained artifact and its sidecar feature-name list.
///
/// Env vars:
/// - `MODEL_PATH`          — joblib artifact (default: `gastric_detection_model.joblib`)
/// - `FEATURES_PATH`       — feature-name list (default: `gastric_detection_features.txt`)
/// - `STRICT_FEATURES`     — reject on schema mismatch instead of zero-filling (default: off)
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model_path: String,
    pub features_path: String,
    pub strict_features: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "gastric_detection_model.joblib".to_string()),
            features_path: std::env::var("FEATURES_PATH")
                .unwrap_or_else(|_| "gastric_detection_features.txt".to_string()),
            strict_features: std::env::var("STRICT_FEATURES")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
