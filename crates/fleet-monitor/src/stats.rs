//! Fleet health summary

use fleet_sim::{Vehicle, VehicleStatus, VehicleType};
use incident_tracker::IncidentCounts;
use risk_classifier::RiskLevel;
use serde::Serialize;

/// Vehicles per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskBreakdown {
    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Moderate => self.moderate += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Vehicles per type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeBreakdown {
    pub bikes: usize,
    pub scooters: usize,
}

/// Vehicles per operational status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub available: usize,
    pub in_use: usize,
    pub maintenance: usize,
}

/// Aggregate fleet statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetStats {
    pub total_vehicles: usize,
    pub by_type: TypeBreakdown,
    pub by_status: StatusBreakdown,
    pub by_risk: RiskBreakdown,
    /// Vehicles with the emergency flag set
    pub emergency_vehicles: usize,
    /// Mean state of charge (%), 0 for an empty fleet
    pub avg_battery_level: f64,
    /// Mean battery temperature (°C), 0 for an empty fleet
    pub avg_temperature_c: f64,
    pub incidents: IncidentCounts,
}

impl FleetStats {
    pub fn collect(vehicles: &[Vehicle], incidents: IncidentCounts) -> Self {
        let mut stats = FleetStats {
            total_vehicles: vehicles.len(),
            incidents,
            ..Default::default()
        };

        let mut battery_sum = 0.0;
        let mut temperature_sum = 0.0;

        for vehicle in vehicles {
            match vehicle.vehicle_type {
                VehicleType::Bike => stats.by_type.bikes += 1,
                VehicleType::Scooter => stats.by_type.scooters += 1,
            }
            match vehicle.status {
                VehicleStatus::Available => stats.by_status.available += 1,
                VehicleStatus::InUse => stats.by_status.in_use += 1,
                VehicleStatus::Maintenance => stats.by_status.maintenance += 1,
            }
            stats.by_risk.record(vehicle.risk_level());
            if vehicle.requires_emergency_response() {
                stats.emergency_vehicles += 1;
            }
            battery_sum += vehicle.battery_level;
            temperature_sum += vehicle.battery_health.temperature_c;
        }

        if !vehicles.is_empty() {
            let n = vehicles.len() as f64;
            stats.avg_battery_level = battery_sum / n;
            stats.avg_temperature_c = temperature_sum / n;
        }

        stats
    }
}
