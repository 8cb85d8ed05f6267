//! HTTP boundary for the gastric-cancer risk assessment service.
//!
//! Serves the assessment contract over axum. The classifier artifact
//! loads once at startup; if it is missing the server still comes up
//! and every assessment request fails fast with a structured 503.

pub mod assessment_routes;

use std::sync::Arc;

use assessment_core::AssessmentError;
use assessment_orchestrator::Assessor;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use feature_encoder::FeatureEncoder;
use model_engine::{EmbeddedClassifier, ModelConfig};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    /// Present only when both the artifact and its feature list loaded.
    pub assessor: Option<Arc<Assessor>>,
}

/// Structured failure body returned for any request-level error.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub error: String,
    pub message: String,
}

/// Route-level error wrapper: anything anyhow-convertible comes in, a
/// structured failure response goes out. A failed request never takes
/// the process down.
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<AssessmentError>() {
            Some(AssessmentError::ModelUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(AssessmentError::SchemaMismatch(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("Request failed: {:#}", self.0);

        let body = FailureBody {
            error: self.0.to_string(),
            message: "Prediction failed.".to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(assessment_routes::predict, assessment_routes::health),
    tags(
        (name = "Assessment", description = "Gastric cancer risk assessment")
    )
)]
struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(assessment_routes::assessment_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Load the classifier artifact and its feature-name list.
fn load_assessor(config: &ModelConfig) -> Result<Assessor, AssessmentError> {
    let classifier = EmbeddedClassifier::load(config)?;

    let encoder = FeatureEncoder::from_feature_file(&config.features_path)
        .map_err(|e| {
            AssessmentError::ModelUnavailable(format!(
                "feature list not readable at {}: {e}",
                config.features_path
            ))
        })?
        .with_strict(config.strict_features);

    tracing::info!(
        "Loaded {} feature columns from {} (strict={})",
        encoder.feature_names().len(),
        config.features_path,
        config.strict_features
    );

    Ok(Assessor::new(Arc::new(classifier), Arc::new(encoder)))
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ModelConfig::default();
    let assessor = match load_assessor(&config) {
        Ok(assessor) => {
            tracing::info!("Assessment pipeline ready (backend={})", assessor.backend_name());
            Some(Arc::new(assessor))
        }
        Err(e) => {
            tracing::warn!("Serving without a classifier, assessments will fail: {e}");
            None
        }
    };

    let state = AppState { assessor };

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
