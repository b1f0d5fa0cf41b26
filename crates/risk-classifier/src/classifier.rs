//! Rule-based risk classifier

use crate::level::RiskLevel;
use crate::thresholds::RiskThresholds;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Battery telemetry consumed by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Cell temperature (°C)
    pub temperature_c: f64,
    /// State of charge (%)
    pub battery_level: f64,
    /// Completed charge cycles
    pub cycle_count: u32,
}

impl Telemetry {
    pub fn new(temperature_c: f64, battery_level: f64, cycle_count: u32) -> Self {
        Self {
            temperature_c,
            battery_level,
            cycle_count,
        }
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub requires_emergency: bool,
}

/// Classify telemetry into a risk level and emergency flag.
///
/// Rules are checked most severe first and the first match wins. The function
/// is total: NaN inputs compare false against every threshold and never panic.
pub fn classify(telemetry: &Telemetry, thresholds: &RiskThresholds) -> RiskAssessment {
    let Telemetry {
        temperature_c: temp,
        battery_level: level,
        cycle_count: cycles,
    } = *telemetry;

    let risk = if temp > thresholds.critical_temp_c
        || (temp > thresholds.high_temp_c && level < thresholds.low_charge_pct)
        || cycles > thresholds.critical_cycles
    {
        RiskLevel::Critical
    } else if temp > thresholds.high_temp_c
        || (level < thresholds.high_charge_pct && temp > thresholds.warm_temp_c)
        || cycles > thresholds.high_cycles
    {
        RiskLevel::High
    } else if temp > thresholds.moderate_temp_c
        || level < thresholds.moderate_charge_pct
        || cycles > thresholds.moderate_cycles
    {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    let requires_emergency = requires_emergency(telemetry, thresholds);

    trace!(
        temp,
        level,
        cycles,
        risk = risk.as_str(),
        requires_emergency,
        "classified battery"
    );

    RiskAssessment {
        level: risk,
        requires_emergency,
    }
}

/// Emergency flag, set independently of the risk level.
///
/// Cycle wear alone never triggers an emergency response.
pub fn requires_emergency(telemetry: &Telemetry, thresholds: &RiskThresholds) -> bool {
    telemetry.temperature_c > thresholds.critical_temp_c
        || (telemetry.temperature_c > thresholds.high_temp_c
            && telemetry.battery_level < thresholds.low_charge_pct)
}
