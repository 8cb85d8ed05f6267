//! The tier-calibration rule cascade.
//!
//! An ordered sequence of override rules applied to an accumulator of
//! (tier, probability, message). Each rule reads the current tier and
//! probability as mutated by earlier rules, but always the original
//! frozen flags. A rule that fires replaces the message; later rules'
//! messages supersede earlier ones.

use assessment_core::RiskTier;
use serde::{Deserialize, Serialize};

use crate::flags::RiskFactorFlags;

/// Calibration accumulator and final outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedRisk {
    pub tier: RiskTier,
    pub probability: f64,
    pub message: String,
}

/// Initial tier assignment from the raw probability, fixed half-open
/// thresholds: [0, 0.3) low, [0.3, 0.6) moderate, [0.6, 1.0] high.
pub fn initial_assessment(probability: f64) -> CalibratedRisk {
    let (tier, message) = if probability < 0.3 {
        (
            RiskTier::Low,
            "Low estimated chance of gastric cancer based on your answers.",
        )
    } else if probability < 0.6 {
        (
            RiskTier::Moderate,
            "Moderate (borderline) risk – you should consider consulting a doctor for proper evaluation.",
        )
    } else {
        (
            RiskTier::High,
            "High estimated chance – you should consult a doctor or gastroenterologist as soon as possible.",
        )
    };

    CalibratedRisk {
        tier,
        probability,
        message: message.to_string(),
    }
}

/// Apply the safety rules in their fixed order. The rule sequence is
/// idempotent over its own output for the same frozen flags.
pub fn apply_rules(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    rule_zero_major_factors(state, flags);
    rule_lone_family_history(state, flags);
    rule_h_pylori_floor(state, flags);
    rule_chronic_gastritis_floor(state, flags);
    rule_lone_weak_factor(state, flags);
    rule_single_factor_high_ceiling(state, flags);
    rule_two_factor_high_ceiling(state, flags);
}

/// Full calibration: initial tier from the raw probability, then the
/// rule cascade against the frozen flags.
pub fn calibrate(probability: f64, flags: &RiskFactorFlags) -> CalibratedRisk {
    let mut state = initial_assessment(probability);
    apply_rules(&mut state, flags);
    tracing::debug!(
        tier = state.tier.as_label(),
        probability = state.probability,
        n_major = flags.n_major(),
        "calibrated risk tier"
    );
    state
}

/// No major risk factors (only age/gender signal): cap at low.
fn rule_zero_major_factors(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 0 && state.tier.is_elevated() {
        state.tier = RiskTier::Low;
        if state.probability >= 0.3 {
            state.probability = 0.25;
        }
        state.message = "Low estimated chance of gastric cancer based on your answers. \
             You have no major risk factors present. However, regular health checkups \
             are always recommended."
            .to_string();
    }
}

/// Family history alone is not strong enough for an elevated tier.
fn rule_lone_family_history(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 1 && flags.only_family_history() && state.tier.is_elevated() {
        state.tier = RiskTier::Low;
        if state.probability >= 0.3 {
            state.probability = 0.28;
        }
        state.message = "Low estimated chance of gastric cancer based on your answers. \
             While you have a family history, you have no other major risk factors \
             present. Regular health checkups and monitoring are recommended."
            .to_string();
    }
}

/// H. pylori is a strong independent risk factor: at least moderate.
fn rule_h_pylori_floor(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.has_h_pylori && state.tier == RiskTier::Low {
        state.tier = RiskTier::Moderate;
        if state.probability < 0.3 {
            state.probability = 0.35;
        }
        state.message = "Moderate risk – Helicobacter pylori infection is a significant \
             risk factor for gastric cancer. You should consider consulting a doctor \
             for proper evaluation and potential treatment."
            .to_string();
    }
}

/// Chronic gastritis alone still warrants at least moderate.
fn rule_chronic_gastritis_floor(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 1 && flags.only_chronic_gastritis() && state.tier == RiskTier::Low {
        state.tier = RiskTier::Moderate;
        if state.probability < 0.3 {
            state.probability = 0.35;
        }
        state.message = "Moderate risk – Chronic gastritis is a condition that requires \
             medical attention. You should consult a doctor for proper evaluation and \
             management."
            .to_string();
    }
}

/// A single weak factor (smoking or high-salt diet) cannot carry an
/// elevated tier on its own.
fn rule_lone_weak_factor(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 1 && flags.lone_weak_factor() && state.tier.is_elevated() {
        state.tier = RiskTier::Low;
        if state.probability >= 0.3 {
            state.probability = 0.28;
        }
        state.message = "Low estimated chance of gastric cancer based on your answers. \
             While you have one risk factor present, it alone is not sufficient for \
             elevated risk. However, reducing this risk factor and regular health \
             checkups are recommended."
            .to_string();
    }
}

/// One major factor that is neither H. pylori nor chronic gastritis can
/// never yield a high tier.
fn rule_single_factor_high_ceiling(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 1
        && state.tier == RiskTier::High
        && !(flags.has_h_pylori || flags.has_chronic_gastritis)
    {
        state.tier = RiskTier::Moderate;
        if state.probability > 0.59 {
            state.probability = 0.59;
        }
        state.message = "Moderate (borderline) risk – only one major risk factor was \
             present. You may still wish to discuss this with a doctor, especially if \
             symptoms persist."
            .to_string();
    }
}

/// Exactly two factors cap at moderate unless they are H. pylori plus
/// chronic gastritis together.
fn rule_two_factor_high_ceiling(state: &mut CalibratedRisk, flags: &RiskFactorFlags) {
    if flags.n_major() == 2
        && state.tier == RiskTier::High
        && !(flags.has_h_pylori && flags.has_chronic_gastritis)
    {
        state.tier = RiskTier::Moderate;
        if state.probability > 0.65 {
            state.probability = 0.65;
        }
        state.message = "Moderate to high risk – you have multiple risk factors present. \
             You should consult a doctor or gastroenterologist for proper evaluation."
            .to_string();
    }
}
