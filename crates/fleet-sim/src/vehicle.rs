//! Vehicle and battery health records

use chrono::{DateTime, Utc};
use risk_classifier::{classify, RiskLevel, RiskThresholds, Telemetry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Micromobility vehicle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Scooter,
}

impl VehicleType {
    /// Prefix used in vehicle ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            VehicleType::Bike => "BIKE",
            VehicleType::Scooter => "SCOOTER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Scooter => "scooter",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in-use",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Battery health record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryHealth {
    /// Derived risk level
    pub risk_level: RiskLevel,
    /// Cell temperature (°C)
    pub temperature_c: f64,
    /// Completed charge cycles
    pub cycle_count: u32,
    /// Last time the pack was inspected
    pub last_inspection: DateTime<Utc>,
    /// Voltage stability (%)
    pub voltage_stability_pct: f64,
    /// Derived emergency flag
    pub requires_emergency_response: bool,
}

impl BatteryHealth {
    /// Build a health record, deriving risk level and emergency flag
    /// from the telemetry.
    pub fn assess(
        temperature_c: f64,
        cycle_count: u32,
        battery_level: f64,
        voltage_stability_pct: f64,
        last_inspection: DateTime<Utc>,
        thresholds: &RiskThresholds,
    ) -> Self {
        let assessment = classify(
            &Telemetry::new(temperature_c, battery_level, cycle_count),
            thresholds,
        );

        Self {
            risk_level: assessment.level,
            temperature_c,
            cycle_count,
            last_inspection,
            voltage_stability_pct,
            requires_emergency_response: assessment.requires_emergency,
        }
    }
}

/// A fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique id, stable for the session
    pub id: String,
    pub vehicle_type: VehicleType,
    pub location: GeoPoint,
    /// State of charge (%)
    pub battery_level: f64,
    pub battery_health: BatteryHealth,
    pub status: VehicleStatus,
    pub last_updated: DateTime<Utc>,
}

impl Vehicle {
    /// Fixture constructor with a fixed location and inspection time
    pub fn with_battery(
        id: impl Into<String>,
        temperature_c: f64,
        battery_level: f64,
        cycle_count: u32,
        thresholds: &RiskThresholds,
    ) -> Self {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            id: id.into(),
            vehicle_type: VehicleType::Bike,
            location: GeoPoint::new(40.7580, -73.9855),
            battery_level,
            battery_health: BatteryHealth::assess(
                temperature_c,
                cycle_count,
                battery_level,
                100.0,
                now,
                thresholds,
            ),
            status: VehicleStatus::Available,
            last_updated: now,
        }
    }

    /// Recompute risk level and emergency flag under `thresholds`
    pub fn reassess(&mut self, thresholds: &RiskThresholds) {
        let assessment = classify(&self.telemetry(), thresholds);
        self.battery_health.risk_level = assessment.level;
        self.battery_health.requires_emergency_response = assessment.requires_emergency;
    }

    /// Telemetry view for the classifier
    pub fn telemetry(&self) -> Telemetry {
        Telemetry::new(
            self.battery_health.temperature_c,
            self.battery_level,
            self.battery_health.cycle_count,
        )
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.battery_health.risk_level
    }

    pub fn requires_emergency_response(&self) -> bool {
        self.battery_health.requires_emergency_response
    }
}
