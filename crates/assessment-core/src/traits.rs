use async_trait::async_trait;

use crate::AssessmentError;

/// Backend-agnostic interface for the trained risk classifier.
///
/// The pipeline only ever sees this capability; any conforming backend
/// (embedded artifact, remote inference service, test double) is
/// substitutable without touching the calibration core.
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// Probability of the positive (higher-risk) class for an encoded
    /// feature vector, in [0, 1].
    async fn predict_probability(&self, features: &[f64]) -> Result<f64, AssessmentError>;

    fn backend_name(&self) -> &'static str;
}
