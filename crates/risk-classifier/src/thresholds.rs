//! Risk threshold configuration

use crate::error::ThresholdError;
use serde::{Deserialize, Serialize};

/// Thresholds used by the risk classifier
///
/// Temperatures are in °C, charge levels in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Above this temperature the battery is critical on its own (thermal runaway)
    pub critical_temp_c: f64,

    /// Above this temperature the battery is high risk
    pub high_temp_c: f64,

    /// Temperature that escalates a low-charge battery to high risk
    pub warm_temp_c: f64,

    /// Above this temperature the battery is moderate risk
    pub moderate_temp_c: f64,

    /// Charge level below which a hot battery becomes critical
    pub low_charge_pct: f64,

    /// Charge level below which a warm battery becomes high risk
    pub high_charge_pct: f64,

    /// Charge level below which the battery is moderate risk
    pub moderate_charge_pct: f64,

    /// Cycle count beyond which the battery is critical
    pub critical_cycles: u32,

    /// Cycle count beyond which the battery is high risk
    pub high_cycles: u32,

    /// Cycle count beyond which the battery is moderate risk
    pub moderate_cycles: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_temp_c: 45.0,
            high_temp_c: 40.0,
            warm_temp_c: 35.0,
            moderate_temp_c: 35.0,
            low_charge_pct: 15.0,
            high_charge_pct: 20.0,
            moderate_charge_pct: 30.0,
            critical_cycles: 800,
            high_cycles: 600,
            moderate_cycles: 400,
        }
    }
}

impl RiskThresholds {
    /// Create strict thresholds (escalate earlier)
    pub fn strict() -> Self {
        Self {
            critical_temp_c: 42.0,
            high_temp_c: 38.0,
            warm_temp_c: 33.0,
            moderate_temp_c: 32.0,
            low_charge_pct: 20.0,
            high_charge_pct: 25.0,
            moderate_charge_pct: 35.0,
            critical_cycles: 700,
            high_cycles: 500,
            moderate_cycles: 300,
        }
    }

    /// Create lenient thresholds (escalate later)
    pub fn lenient() -> Self {
        Self {
            critical_temp_c: 47.0,
            high_temp_c: 42.0,
            warm_temp_c: 37.0,
            moderate_temp_c: 37.0,
            ..Default::default()
        }
    }

    /// Check that the threshold set is internally consistent
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let temps = [
            ("critical_temp_c", self.critical_temp_c),
            ("high_temp_c", self.high_temp_c),
            ("warm_temp_c", self.warm_temp_c),
            ("moderate_temp_c", self.moderate_temp_c),
        ];
        let charges = [
            ("low_charge_pct", self.low_charge_pct),
            ("high_charge_pct", self.high_charge_pct),
            ("moderate_charge_pct", self.moderate_charge_pct),
        ];

        for (field, value) in temps.iter().chain(charges.iter()) {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite {
                    field: *field,
                    value: *value,
                });
            }
        }

        for (field, value) in charges {
            if !(0.0..=100.0).contains(&value) {
                return Err(ThresholdError::OutOfRange { field, value });
            }
        }

        // Severe temperature and cycle thresholds sit at or above milder ones
        check_order(temps[0], temps[1])?;
        check_order(temps[1], temps[3])?;
        check_order(temps[1], temps[2])?;
        check_order(
            ("critical_cycles", self.critical_cycles as f64),
            ("high_cycles", self.high_cycles as f64),
        )?;
        check_order(
            ("high_cycles", self.high_cycles as f64),
            ("moderate_cycles", self.moderate_cycles as f64),
        )?;

        // Charge thresholds run the other way: lower charge is more severe
        check_order(charges[2], charges[1])?;
        check_order(charges[1], charges[0])?;

        Ok(())
    }
}

fn check_order(
    (stricter, stricter_value): (&'static str, f64),
    (milder, milder_value): (&'static str, f64),
) -> Result<(), ThresholdError> {
    if stricter_value < milder_value {
        Err(ThresholdError::Ordering {
            stricter,
            stricter_value,
            milder,
            milder_value,
        })
    } else {
        Ok(())
    }
}
