//! Request-scoped assessment pipeline.
//!
//! Normalize answers, encode the feature vector, obtain the raw model
//! probability through the Classifier Port, then run the safety
//! calibration and synthesize drivers and recommendations. Stateless
//! per request; the classifier handle and encoder are the only shared
//! (immutable) resources.

use std::sync::Arc;

use assessment_core::{AssessmentError, RiskAssessment, RiskClassifier, ScreeningAnswers};
use chrono::Utc;
use feature_encoder::FeatureEncoder;
use risk_calibrator::{calibrate, synthesize, RiskFactorFlags};
use serde_json::Value;

pub struct Assessor {
    classifier: Arc<dyn RiskClassifier>,
    encoder: Arc<FeatureEncoder>,
}

impl Assessor {
    pub fn new(classifier: Arc<dyn RiskClassifier>, encoder: Arc<FeatureEncoder>) -> Self {
        Self {
            classifier,
            encoder,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.classifier.backend_name()
    }

    /// Run one full assessment. Malformed answer fields are imputed,
    /// never rejected; classifier failures propagate untouched and are
    /// never retried.
    pub async fn assess(&self, raw: &Value) -> Result<RiskAssessment, AssessmentError> {
        let answers = ScreeningAnswers::from_json(raw);
        let vector = self.encoder.encode(&answers)?;

        let raw_probability = self.classifier.predict_probability(&vector).await?;
        // Contain a misbehaving backend; the cascade assumes [0, 1].
        let raw_probability = raw_probability.clamp(0.0, 1.0);

        // Flags are frozen here; the cascade never recomputes them.
        let flags = RiskFactorFlags::extract(&answers);
        let calibrated = calibrate(raw_probability, &flags);
        let (drivers, recommendations) = synthesize(&answers, &flags, calibrated.tier);

        tracing::debug!(
            raw = raw_probability,
            adjusted = calibrated.probability,
            tier = calibrated.tier.as_label(),
            "assessment complete"
        );

        Ok(RiskAssessment {
            probability: calibrated.probability,
            tier: calibrated.tier,
            message: calibrated.message,
            drivers,
            recommendations,
            date: Utc::now().date_naive(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_core::RiskTier;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedClassifier(f64);

    #[async_trait]
    impl RiskClassifier for FixedClassifier {
        async fn predict_probability(&self, _features: &[f64]) -> Result<f64, AssessmentError> {
            Ok(self.0)
        }

        fn backend_name(&self) -> &'static str {
            "fixed"
        }
    }

    struct UnavailableClassifier;

    #[async_trait]
    impl RiskClassifier for UnavailableClassifier {
        async fn predict_probability(&self, _features: &[f64]) -> Result<f64, AssessmentError> {
            Err(AssessmentError::ModelUnavailable("not loaded".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "unavailable"
        }
    }

    fn assessor(probability: f64) -> Assessor {
        let feature_names = vec!["age".to_string(), "gender_Male".to_string()];
        Assessor::new(
            Arc::new(FixedClassifier(probability)),
            Arc::new(FeatureEncoder::new(feature_names)),
        )
    }

    #[tokio::test]
    async fn end_to_end_h_pylori_floor() {
        let result = assessor(0.2)
            .assess(&json!({"helicobacter_pylori_infection": 1}))
            .await
            .unwrap();

        assert_eq!(result.tier, RiskTier::Moderate);
        assert_eq!(result.probability, 0.35);
        assert!(result.message.contains("Helicobacter pylori"));
        assert_eq!(result.drivers[0].name, "H. Pylori Infection");
        assert!(result.recommendations.len() <= 4);
    }

    #[tokio::test]
    async fn end_to_end_no_factors_downgrade() {
        let result = assessor(0.5)
            .assess(&json!({"age": 45, "gender": "Male"}))
            .await
            .unwrap();

        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.probability, 0.25);
        assert_eq!(result.drivers[0].name, "General Health Factors");
    }

    #[tokio::test]
    async fn empty_request_body_still_assesses() {
        let result = assessor(0.1).assess(&json!({})).await.unwrap();
        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.probability, 0.1);
        assert_eq!(result.date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn out_of_range_backend_probability_is_contained() {
        let result = assessor(1.7)
            .assess(&json!({
                "family_history": 1,
                "helicobacter_pylori_infection": 1,
                "smoking_habits": 1,
            }))
            .await
            .unwrap();

        assert!(result.probability <= 1.0);
        assert_eq!(result.tier, RiskTier::High);
    }

    #[tokio::test]
    async fn model_unavailable_propagates_untouched() {
        let encoder = Arc::new(FeatureEncoder::new(vec!["age".to_string()]));
        let assessor = Assessor::new(Arc::new(UnavailableClassifier), encoder);

        let err = assessor.assess(&json!({"age": 50})).await.unwrap_err();
        assert!(matches!(err, AssessmentError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn driver_and_recommendation_caps_hold() {
        let result = assessor(0.9)
            .assess(&json!({
                "age": 70,
                "family_history": 1,
                "smoking_habits": 1,
                "alcohol_consumption": 1,
                "helicobacter_pylori_infection": 1,
                "dietary_habits": "High_Salt",
                "existing_conditions": "Chronic Gastritis",
            }))
            .await
            .unwrap();

        assert!(result.drivers.len() <= 3);
        assert!(result.recommendations.len() <= 4);
    }
}
