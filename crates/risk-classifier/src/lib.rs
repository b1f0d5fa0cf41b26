//! Battery Risk Classification
//!
//! Maps battery telemetry (temperature, charge level, cycle count) to a
//! discrete risk level and an emergency-response flag.

mod classifier;
mod error;
mod level;
mod thresholds;

pub use classifier::{classify, requires_emergency, RiskAssessment, Telemetry};
pub use error::ThresholdError;
pub use level::RiskLevel;
pub use thresholds::RiskThresholds;
