//! Assessment API routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use assessment_core::{AssessmentError, RiskAssessment};

use crate::{AppError, AppState};

/// Service health and model readiness.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<&'static str>,
}

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/predict", post(predict))
        .route("/api/health", get(health))
}

/// Run one risk assessment over the submitted questionnaire answers.
///
/// All answer fields are optional; missing or malformed values are
/// imputed, never rejected. Unknown extra fields are ignored.
#[utoipa::path(
    post,
    path = "/api/predict",
    request_body(content = String, description = "Questionnaire answers JSON"),
    responses(
        (status = 200, description = "Calibrated risk assessment"),
        (status = 503, description = "Classifier artifact unavailable")
    ),
    tag = "Assessment"
)]
pub(crate) async fn predict(
    State(state): State<AppState>,
    Json(answers): Json<Value>,
) -> Result<Json<RiskAssessment>, AppError> {
    let assessor = state.assessor.as_ref().ok_or_else(|| {
        AssessmentError::ModelUnavailable("classifier artifact not loaded".to_string())
    })?;

    let assessment = assessor.assess(&answers).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service health and model readiness")),
    tag = "Assessment"
)]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        model_loaded: state.assessor.is_some(),
        backend: state.assessor.as_ref().map(|a| a.backend_name()),
    })
}
