//! Risk driver and recommendation synthesis.

use assessment_core::{Impact, RiskDriver, RiskTier, ScreeningAnswers};

use crate::flags::RiskFactorFlags;

const MAX_DRIVERS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 4;

/// Select the ranked risk drivers and recommended next steps for a
/// calibrated assessment. Candidate drivers are evaluated in a fixed
/// priority order and the first three kept; recommendations start from
/// tier base steps, then flag-specific additions, truncated to four.
pub fn synthesize(
    answers: &ScreeningAnswers,
    flags: &RiskFactorFlags,
    tier: RiskTier,
) -> (Vec<RiskDriver>, Vec<String>) {
    (drivers(answers, flags), recommendations(flags, tier))
}

fn drivers(answers: &ScreeningAnswers, flags: &RiskFactorFlags) -> Vec<RiskDriver> {
    let mut drivers = Vec::new();

    if flags.has_h_pylori {
        drivers.push(RiskDriver::new("H. Pylori Infection", Impact::High));
    }
    if flags.has_family_history {
        drivers.push(RiskDriver::new("Family History", Impact::High));
    }
    if flags.has_chronic_gastritis {
        drivers.push(RiskDriver::new("Chronic Gastritis", Impact::High));
    }
    if flags.has_smoking {
        drivers.push(RiskDriver::new("Smoking", Impact::Medium));
    }
    if flags.has_high_salt {
        drivers.push(RiskDriver::new("High Salt Diet", Impact::Medium));
    }
    if answers.alcohol_consumption.round() as i64 == 1 {
        drivers.push(RiskDriver::new("Alcohol Consumption", Impact::Medium));
    }
    if answers.age > 60.0 {
        drivers.push(RiskDriver::new("Age > 60", Impact::Medium));
    }

    drivers.truncate(MAX_DRIVERS);
    if drivers.is_empty() {
        drivers.push(RiskDriver::new("General Health Factors", Impact::Low));
    }
    drivers
}

fn recommendations(flags: &RiskFactorFlags, tier: RiskTier) -> Vec<String> {
    let mut steps: Vec<String> = Vec::new();

    match tier {
        RiskTier::High => {
            steps.push("Immediate consultation with a gastroenterologist.".to_string());
            steps.push("Schedule an Endoscopy (EGD) for detailed visualization.".to_string());
        }
        RiskTier::Moderate => {
            steps.push("Consult a doctor for a physical examination.".to_string());
            steps.push("Consider non-invasive screening tests.".to_string());
        }
        RiskTier::Low => {
            steps.push("Continue regular health checkups.".to_string());
            steps.push("Maintain a healthy lifestyle.".to_string());
        }
    }

    if flags.has_h_pylori {
        steps.push("Discuss H. Pylori eradication therapy with your doctor.".to_string());
    }
    if flags.has_high_salt {
        steps.push("Reduce salt intake and avoid processed foods.".to_string());
    }
    if flags.has_smoking {
        steps.push("Join a smoking cessation program.".to_string());
    }
    if flags.has_chronic_gastritis {
        steps.push("Monitor for symptoms of dyspepsia or pain.".to_string());
    }

    steps.truncate(MAX_RECOMMENDATIONS);
    steps
}
