use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User-facing risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Moderate or high.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskTier::Moderate | RiskTier::High)
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Impact rank of a reported risk driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// A named, impact-ranked contributor to the reported risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDriver {
    pub name: String,
    pub impact: Impact,
}

impl RiskDriver {
    pub fn new(name: &str, impact: Impact) -> Self {
        Self {
            name: name.to_string(),
            impact,
        }
    }
}

/// Questionnaire answers after imputation. Every declared field is
/// present and typed; construction never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningAnswers {
    pub age: f64,
    pub family_history: f64,
    pub smoking_habits: f64,
    pub alcohol_consumption: f64,
    pub helicobacter_pylori_infection: f64,
    pub gender: String,
    pub ethnicity: String,
    pub geographical_location: String,
    pub dietary_habits: String,
    pub existing_conditions: String,
}

impl ScreeningAnswers {
    /// Build from an arbitrary JSON object. Unknown fields are ignored;
    /// missing or uncoercible numerics impute the single-row median,
    /// which for one row degenerates to the value itself or 0; missing
    /// categoricals impute the literal "Unknown".
    pub fn from_json(raw: &Value) -> Self {
        Self {
            age: numeric_field(raw, "age"),
            family_history: numeric_field(raw, "family_history"),
            smoking_habits: numeric_field(raw, "smoking_habits"),
            alcohol_consumption: numeric_field(raw, "alcohol_consumption"),
            helicobacter_pylori_infection: numeric_field(raw, "helicobacter_pylori_infection"),
            gender: categorical_field(raw, "gender"),
            ethnicity: categorical_field(raw, "ethnicity"),
            geographical_location: categorical_field(raw, "geographical_location"),
            dietary_habits: categorical_field(raw, "dietary_habits"),
            existing_conditions: categorical_field(raw, "existing_conditions"),
        }
    }
}

fn numeric_field(raw: &Value, field: &str) -> f64 {
    raw.get(field).and_then(coerce_numeric).unwrap_or(0.0)
}

fn categorical_field(raw: &Value, field: &str) -> String {
    raw.get(field)
        .and_then(coerce_text)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Numeric coercion in the spirit of `to_numeric(errors="coerce")`:
/// numbers pass through, numeric strings parse, booleans map to 0/1,
/// everything else is treated as missing.
fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Categorical coercion: strings pass through, other scalars are
/// rendered to text, null/containers are treated as missing.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Final assessment record, serialized verbatim as the boundary
/// response of the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "probability_of_cancer")]
    pub probability: f64,
    #[serde(rename = "risk_level")]
    pub tier: RiskTier,
    pub message: String,
    #[serde(rename = "risk_drivers")]
    pub drivers: Vec<RiskDriver>,
    pub recommendations: Vec<String>,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answers_from_empty_object_impute_everything() {
        let answers = ScreeningAnswers::from_json(&json!({}));
        assert_eq!(answers.age, 0.0);
        assert_eq!(answers.family_history, 0.0);
        assert_eq!(answers.gender, "Unknown");
        assert_eq!(answers.dietary_habits, "Unknown");
        assert_eq!(answers.existing_conditions, "Unknown");
    }

    #[test]
    fn numeric_coercion_accepts_strings_and_bools() {
        let answers = ScreeningAnswers::from_json(&json!({
            "age": "64",
            "family_history": true,
            "smoking_habits": " 1 ",
            "alcohol_consumption": "not a number",
            "helicobacter_pylori_infection": null,
        }));
        assert_eq!(answers.age, 64.0);
        assert_eq!(answers.family_history, 1.0);
        assert_eq!(answers.smoking_habits, 1.0);
        assert_eq!(answers.alcohol_consumption, 0.0);
        assert_eq!(answers.helicobacter_pylori_infection, 0.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let answers = ScreeningAnswers::from_json(&json!({
            "age": 40,
            "patient_name": "Guest",
            "extra": {"nested": true},
        }));
        assert_eq!(answers.age, 40.0);
    }

    #[test]
    fn non_object_input_imputes_everything() {
        let answers = ScreeningAnswers::from_json(&json!("garbage"));
        assert_eq!(answers.age, 0.0);
        assert_eq!(answers.gender, "Unknown");
    }

    #[test]
    fn assessment_serializes_with_boundary_field_names() {
        let assessment = RiskAssessment {
            probability: 0.35,
            tier: RiskTier::Moderate,
            message: "msg".to_string(),
            drivers: vec![RiskDriver::new("H. Pylori Infection", Impact::High)],
            recommendations: vec!["Consult a doctor for a physical examination.".to_string()],
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        };

        let value = serde_json::to_value(&assessment).unwrap();
        assert_eq!(value["probability_of_cancer"], 0.35);
        assert_eq!(value["risk_level"], "moderate");
        assert_eq!(value["risk_drivers"][0]["impact"], "High");
        assert_eq!(value["date"], "2026-08-07");
    }
}
