use std::collections::HashMap;
use std::io;
use std::path::Path;

use assessment_core::{AssessmentError, ScreeningAnswers};

use crate::schema::{CATEGORICAL_FIELDS, NUMERIC_FIELDS};

/// Encodes imputed answers into the classifier's trained column space.
///
/// Owns the ordered feature-name list recorded at training time. In the
/// default lenient mode encoding always succeeds: encoded columns the
/// model does not know are dropped, expected columns the input did not
/// produce are zero-filled. Strict mode instead rejects inputs whose
/// encoding falls outside the trained space.
pub struct FeatureEncoder {
    feature_names: Vec<String>,
    strict: bool,
}

impl FeatureEncoder {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            strict: false,
        }
    }

    /// Read the feature-name list saved alongside the model artifact,
    /// one column name per line.
    pub fn from_feature_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let names = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::new(names))
    }

    /// Reject on schema mismatch instead of zero-filling. Opt-in only.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Encode answers into a vector whose column order and cardinality
    /// exactly match the trained feature list.
    pub fn encode(&self, answers: &ScreeningAnswers) -> Result<Vec<f64>, AssessmentError> {
        let columns = encode_columns(answers);

        if self.strict {
            let mut unknown: Vec<&str> = columns
                .keys()
                .filter(|name| !self.feature_names.iter().any(|f| f == *name))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                unknown.sort_unstable();
                return Err(AssessmentError::SchemaMismatch(format!(
                    "columns not in the trained feature space: {}",
                    unknown.join(", ")
                )));
            }
        } else {
            for name in columns.keys() {
                if !self.feature_names.iter().any(|f| f == name) {
                    tracing::debug!("Dropping encoded column unknown to the model: {}", name);
                }
            }
        }

        Ok(self
            .feature_names
            .iter()
            .map(|name| columns.get(name).copied().unwrap_or(0.0))
            .collect())
    }
}

/// One-hot encode a single row, dropping the first training category of
/// each categorical field exactly as the training pipeline did.
fn encode_columns(answers: &ScreeningAnswers) -> HashMap<String, f64> {
    let mut columns = HashMap::new();

    for (field, value) in [
        (NUMERIC_FIELDS[0], answers.age),
        (NUMERIC_FIELDS[1], answers.family_history),
        (NUMERIC_FIELDS[2], answers.smoking_habits),
        (NUMERIC_FIELDS[3], answers.alcohol_consumption),
        (NUMERIC_FIELDS[4], answers.helicobacter_pylori_infection),
    ] {
        columns.insert(field.to_string(), value);
    }

    for field in &CATEGORICAL_FIELDS {
        let value = match field.name {
            "gender" => answers.gender.as_str(),
            "ethnicity" => answers.ethnicity.as_str(),
            "geographical_location" => answers.geographical_location.as_str(),
            "dietary_habits" => answers.dietary_habits.as_str(),
            "existing_conditions" => answers.existing_conditions.as_str(),
            _ => unreachable!("schema field without an answers accessor"),
        };
        if value != field.dropped_category() {
            columns.insert(field.column_name(value), 1.0);
        }
    }

    columns
}
