use std::path::Path;
use std::sync::Arc;

use assessment_core::{AssessmentError, RiskClassifier};
use async_trait::async_trait;
use pyo3::prelude::*;

use crate::ModelConfig;

/// In-process wrapper around the joblib-serialized classifier.
struct JoblibModel {
    model: Py<PyAny>,
}

unsafe impl Send for JoblibModel {}
unsafe impl Sync for JoblibModel {}

impl JoblibModel {
    fn load(path: &str) -> Result<Self, AssessmentError> {
        Python::attach(|py| {
            let joblib = py.import("joblib").map_err(|e: PyErr| {
                AssessmentError::ModelUnavailable(format!("Failed to import joblib: {e}"))
            })?;

            let model = joblib.call_method1("load", (path,)).map_err(|e: PyErr| {
                AssessmentError::ModelUnavailable(format!("joblib.load({path}) failed: {e}"))
            })?;

            Ok(Self {
                model: model.unbind(),
            })
        })
    }

    /// Probability of the positive class for one encoded row:
    /// `model.predict_proba([row])[:, 1][0]`.
    fn predict_sync(&self, features: &[f64]) -> Result<f64, AssessmentError> {
        Python::attach(|py| {
            let np = py.import("numpy").map_err(|e: PyErr| {
                AssessmentError::ModelUnavailable(format!("numpy not found: {e}"))
            })?;

            let arr = np
                .call_method1("array", (vec![features.to_vec()],))
                .map_err(|e: PyErr| {
                    AssessmentError::ModelUnavailable(format!("numpy.array() failed: {e}"))
                })?;

            let proba = self
                .model
                .call_method1(py, "predict_proba", (arr,))
                .map_err(|e: PyErr| {
                    AssessmentError::ModelUnavailable(format!("predict_proba() failed: {e}"))
                })?;

            let row = proba.bind(py).get_item(0).map_err(|e: PyErr| {
                AssessmentError::ModelUnavailable(format!("Empty prediction result: {e}"))
            })?;
            let probability: f64 = row
                .get_item(1)
                .map_err(|e: PyErr| {
                    AssessmentError::ModelUnavailable(format!(
                        "Missing positive-class column: {e}"
                    ))
                })?
                .extract()
                .map_err(|e: PyErr| {
                    AssessmentError::ModelUnavailable(format!(
                        "Failed to extract probability: {e}"
                    ))
                })?;

            Ok(probability)
        })
    }
}

/// Classifier Port backed by the embedded Python interpreter.
#[derive(Clone)]
pub struct EmbeddedClassifier {
    inner: Arc<JoblibModel>,
}

impl EmbeddedClassifier {
    /// Load the artifact once. Missing files are reported before the
    /// interpreter is touched so startup logs stay legible.
    pub fn load(config: &ModelConfig) -> Result<Self, AssessmentError> {
        if !Path::new(&config.model_path).is_file() {
            return Err(AssessmentError::ModelUnavailable(format!(
                "model artifact not found at {}",
                config.model_path
            )));
        }

        // Keep scikit-learn / joblib from spawning worker processes;
        // with PyO3, sys.executable is this server binary.
        std::env::set_var("OMP_NUM_THREADS", "1");
        std::env::set_var("JOBLIB_MULTIPROCESSING", "0");

        let model = JoblibModel::load(&config.model_path)?;
        tracing::info!("Loaded classifier artifact from {}", config.model_path);

        Ok(Self {
            inner: Arc::new(model),
        })
    }
}

#[async_trait]
impl RiskClassifier for EmbeddedClassifier {
    async fn predict_probability(&self, features: &[f64]) -> Result<f64, AssessmentError> {
        let model = self.inner.clone();
        let features = features.to_vec();
        tokio::task::spawn_blocking(move || model.predict_sync(&features))
            .await
            .map_err(|e| AssessmentError::Calibration(e.to_string()))?
    }

    fn backend_name(&self) -> &'static str {
        "embedded-joblib"
    }
}
