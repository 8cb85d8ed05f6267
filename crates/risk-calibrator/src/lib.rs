//! Safety calibration of raw classifier output.
//!
//! Turns a raw model probability into a clinically gated risk tier, an
//! ordered list of risk drivers, and a recommendation set. The tier
//! adjustment is a fixed, ordered cascade of override rules; ordering is
//! load-bearing and the risk-factor flags feeding it are computed once
//! per request and never recomputed mid-cascade.

pub mod advice;
pub mod cascade;
pub mod flags;

pub use advice::synthesize;
pub use cascade::{apply_rules, calibrate, initial_assessment, CalibratedRisk};
pub use flags::RiskFactorFlags;
