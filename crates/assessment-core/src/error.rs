use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessmentError {
    /// The classifier artifact failed to load at startup or the
    /// inference call itself failed. Fatal for the request, never
    /// retried.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Raised only when the encoder runs in strict mode and the encoded
    /// columns disagree with the model's feature list. The default
    /// lenient mode never produces this.
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Unexpected failure inside the assessment pipeline.
    #[error("Calibration failed: {0}")]
    Calibration(String),
}
