use assessment_core::ScreeningAnswers;

/// Major risk factor flags, derived directly from the questionnaire
/// answers rather than the encoded feature vector. Computed once per
/// request; the cascade reads them but never recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskFactorFlags {
    pub has_family_history: bool,
    pub has_h_pylori: bool,
    pub has_smoking: bool,
    pub has_high_salt: bool,
    pub has_chronic_gastritis: bool,
}

impl RiskFactorFlags {
    pub fn extract(answers: &ScreeningAnswers) -> Self {
        Self {
            has_family_history: is_set(answers.family_history),
            has_h_pylori: is_set(answers.helicobacter_pylori_infection),
            has_smoking: is_set(answers.smoking_habits),
            has_high_salt: answers.dietary_habits == "High_Salt",
            has_chronic_gastritis: answers.existing_conditions == "Chronic Gastritis",
        }
    }

    /// Count of true major risk factors.
    pub fn n_major(&self) -> usize {
        [
            self.has_family_history,
            self.has_h_pylori,
            self.has_smoking,
            self.has_high_salt,
            self.has_chronic_gastritis,
        ]
        .iter()
        .filter(|f| **f)
        .count()
    }

    /// Family history is the only factor present.
    pub fn only_family_history(&self) -> bool {
        self.has_family_history
            && !(self.has_h_pylori
                || self.has_smoking
                || self.has_high_salt
                || self.has_chronic_gastritis)
    }

    /// Chronic gastritis is the only factor present.
    pub fn only_chronic_gastritis(&self) -> bool {
        self.has_chronic_gastritis
            && !(self.has_family_history
                || self.has_h_pylori
                || self.has_smoking
                || self.has_high_salt)
    }

    /// Smoking or a high-salt diet is the sole factor present.
    pub fn lone_weak_factor(&self) -> bool {
        (self.has_smoking || self.has_high_salt)
            && !(self.has_family_history || self.has_h_pylori || self.has_chronic_gastritis)
    }
}

/// Rounded integer equality, tolerating near-integer numeric noise
/// (0.98 counts as set).
fn is_set(value: f64) -> bool {
    value.round() as i64 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(raw: serde_json::Value) -> ScreeningAnswers {
        ScreeningAnswers::from_json(&raw)
    }

    #[test]
    fn flags_from_typical_answers() {
        let flags = RiskFactorFlags::extract(&answers(json!({
            "family_history": 1,
            "helicobacter_pylori_infection": 0,
            "smoking_habits": 1,
            "dietary_habits": "High_Salt",
            "existing_conditions": "Chronic Gastritis",
        })));

        assert!(flags.has_family_history);
        assert!(!flags.has_h_pylori);
        assert!(flags.has_smoking);
        assert!(flags.has_high_salt);
        assert!(flags.has_chronic_gastritis);
        assert_eq!(flags.n_major(), 4);
    }

    #[test]
    fn near_integer_noise_rounds_to_set() {
        let flags = RiskFactorFlags::extract(&answers(json!({
            "family_history": 0.98,
            "smoking_habits": 0.4,
        })));
        assert!(flags.has_family_history);
        assert!(!flags.has_smoking);
    }

    #[test]
    fn absent_fields_are_all_false() {
        let flags = RiskFactorFlags::extract(&answers(json!({})));
        assert_eq!(flags, RiskFactorFlags::default());
        assert_eq!(flags.n_major(), 0);
    }

    #[test]
    fn diabetes_is_not_a_major_factor() {
        let flags = RiskFactorFlags::extract(&answers(json!({
            "existing_conditions": "Diabetes",
        })));
        assert!(!flags.has_chronic_gastritis);
        assert_eq!(flags.n_major(), 0);
    }

    #[test]
    fn sole_factor_helpers() {
        let family = RiskFactorFlags {
            has_family_history: true,
            ..Default::default()
        };
        assert!(family.only_family_history());
        assert!(!family.lone_weak_factor());

        let salt = RiskFactorFlags {
            has_high_salt: true,
            ..Default::default()
        };
        assert!(salt.lone_weak_factor());

        let both = RiskFactorFlags {
            has_family_history: true,
            has_high_salt: true,
            ..Default::default()
        };
        assert!(!both.only_family_history());
        assert!(!both.lone_weak_factor());
    }
}
