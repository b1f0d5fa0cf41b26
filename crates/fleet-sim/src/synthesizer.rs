//! Seedable fleet synthesizer

use crate::vehicle::{BatteryHealth, GeoPoint, Vehicle, VehicleStatus, VehicleType};
use crate::SynthError;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use risk_classifier::{RiskLevel, RiskThresholds};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// New York City (five boroughs)
    pub const NYC: GeoBounds = GeoBounds {
        min_lat: 40.4774,
        max_lat: 40.9176,
        min_lon: -74.2591,
        max_lon: -73.7004,
    };

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }

    fn validate(&self) -> Result<(), SynthError> {
        let finite = [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(SynthError::InvalidBounds("non-finite coordinate".into()));
        }
        if self.min_lat >= self.max_lat || self.min_lon >= self.max_lon {
            return Err(SynthError::InvalidBounds(format!(
                "empty box lat [{}, {}] lon [{}, {}]",
                self.min_lat, self.max_lat, self.min_lon, self.max_lon
            )));
        }
        if self.min_lat < -90.0 || self.max_lat > 90.0 || self.min_lon < -180.0 || self.max_lon > 180.0 {
            return Err(SynthError::InvalidBounds("outside WGS84 range".into()));
        }
        Ok(())
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::NYC
    }
}

/// Synthesizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Number of vehicles to generate
    pub fleet_size: usize,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Share of scooters in the fleet
    pub scooter_ratio: f64,
    /// Share of vehicles with an overheating pack
    pub hot_ratio: f64,
    /// Placement area
    pub bounds: GeoBounds,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            fleet_size: 150,
            seed: None,
            scooter_ratio: 0.4,
            hot_ratio: 0.08,
            bounds: GeoBounds::NYC,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.fleet_size == 0 {
            return Err(SynthError::EmptyFleet);
        }
        for (field, value) in [("scooter_ratio", self.scooter_ratio), ("hot_ratio", self.hot_ratio)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SynthError::InvalidRatio { field, value });
            }
        }
        self.bounds.validate()
    }
}

/// Generates vehicles with randomized placement and battery metrics
pub struct FleetSynthesizer {
    config: SynthConfig,
    thresholds: RiskThresholds,
    rng: StdRng,
}

impl FleetSynthesizer {
    /// Create a synthesizer; the configuration is validated up front
    pub fn new(config: SynthConfig, thresholds: RiskThresholds) -> Result<Self, SynthError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "Creating fleet synthesizer: {} vehicles, seed {:?}",
            config.fleet_size, config.seed
        );

        Ok(Self {
            config,
            thresholds,
            rng,
        })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Generate a full fleet stamped at `now`
    pub fn generate(&mut self, now: DateTime<Utc>) -> Vec<Vehicle> {
        let vehicles: Vec<Vehicle> = (1..=self.config.fleet_size)
            .map(|index| self.vehicle(index, now))
            .collect();

        let emergencies = vehicles
            .iter()
            .filter(|v| v.requires_emergency_response())
            .count();
        let critical = vehicles
            .iter()
            .filter(|v| v.risk_level() == RiskLevel::Critical)
            .count();
        info!(
            "Generated {} vehicles ({} critical, {} requiring emergency response)",
            vehicles.len(),
            critical,
            emergencies
        );

        vehicles
    }

    fn vehicle(&mut self, index: usize, now: DateTime<Utc>) -> Vehicle {
        let rng = &mut self.rng;
        let bounds = &self.config.bounds;

        let vehicle_type = if rng.random_bool(self.config.scooter_ratio) {
            VehicleType::Scooter
        } else {
            VehicleType::Bike
        };

        let location = GeoPoint::new(
            rng.random_range(bounds.min_lat..=bounds.max_lat),
            rng.random_range(bounds.min_lon..=bounds.max_lon),
        );

        let battery_level = rng.random_range(5.0..=100.0_f64).round();
        let temperature_c = if rng.random_bool(self.config.hot_ratio) {
            rng.random_range(38.0..55.0)
        } else {
            rng.random_range(20.0..38.0)
        };
        let cycle_count = rng.random_range(0..1000);
        let voltage_stability_pct = rng.random_range(85.0..=100.0);
        let last_inspection = now - Duration::days(rng.random_range(0..=90));

        let status = match rng.random_range(0.0..1.0) {
            r if r < 0.6 => VehicleStatus::Available,
            r if r < 0.9 => VehicleStatus::InUse,
            _ => VehicleStatus::Maintenance,
        };

        let battery_health = BatteryHealth::assess(
            temperature_c,
            cycle_count,
            battery_level,
            voltage_stability_pct,
            last_inspection,
            &self.thresholds,
        );

        let id = format!("{}-{:04}", vehicle_type.id_prefix(), index);
        debug!(
            "{}: {:.1}°C, {}%, {} cycles -> {}",
            id, temperature_c, battery_level, cycle_count, battery_health.risk_level
        );

        Vehicle {
            id,
            vehicle_type,
            location,
            battery_level,
            battery_health,
            status,
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use risk_classifier::classify;
    use std::collections::HashSet;

    fn seeded(seed: u64, fleet_size: usize) -> FleetSynthesizer {
        let config = SynthConfig {
            fleet_size,
            seed: Some(seed),
            ..Default::default()
        };
        FleetSynthesizer::new(config, RiskThresholds::default()).unwrap()
    }

    #[test]
    fn test_same_seed_same_fleet() {
        let now = Utc::now();
        let a = seeded(42, 50).generate(now);
        let b = seeded(42, 50).generate(now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_fleet() {
        let now = Utc::now();
        let a = seeded(1, 50).generate(now);
        let b = seeded(2, 50).generate(now);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fleet_size_and_unique_ids() {
        let fleet = seeded(7, 200).generate(Utc::now());
        assert_eq!(fleet.len(), 200);
        let ids: HashSet<_> = fleet.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_id_matches_type() {
        for vehicle in seeded(3, 100).generate(Utc::now()) {
            assert!(vehicle.id.starts_with(vehicle.vehicle_type.id_prefix()));
        }
    }

    #[test]
    fn test_hot_ratio_one_produces_emergencies() {
        let config = SynthConfig {
            fleet_size: 100,
            seed: Some(11),
            hot_ratio: 1.0,
            ..Default::default()
        };
        let fleet = FleetSynthesizer::new(config, RiskThresholds::default())
            .unwrap()
            .generate(Utc::now());
        assert!(fleet.iter().all(|v| v.battery_health.temperature_c >= 38.0));
        assert!(fleet.iter().any(|v| v.requires_emergency_response()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let empty = SynthConfig {
            fleet_size: 0,
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(SynthError::EmptyFleet));

        let ratio = SynthConfig {
            scooter_ratio: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            ratio.validate(),
            Err(SynthError::InvalidRatio { field: "scooter_ratio", .. })
        ));

        let bounds = SynthConfig {
            bounds: GeoBounds {
                min_lat: 41.0,
                max_lat: 40.0,
                ..GeoBounds::NYC
            },
            ..Default::default()
        };
        assert!(matches!(bounds.validate(), Err(SynthError::InvalidBounds(_))));
        assert!(FleetSynthesizer::new(bounds, RiskThresholds::default()).is_err());
    }

    #[test]
    fn test_partial_bounds_fill_from_defaults() {
        let config: SynthConfig =
            serde_json::from_str(r#"{ "fleet_size": 10, "bounds": { "min_lat": 40.6 } }"#).unwrap();
        assert_eq!(config.fleet_size, 10);
        assert_eq!(config.bounds.min_lat, 40.6);
        assert_eq!(config.bounds.max_lat, GeoBounds::NYC.max_lat);
        assert_eq!(config.bounds.min_lon, GeoBounds::NYC.min_lon);
        assert!(config.validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_generated_vehicles_are_well_formed(seed in any::<u64>()) {
            let now = Utc::now();
            let thresholds = RiskThresholds::default();
            for vehicle in seeded(seed, 40).generate(now) {
                prop_assert!(GeoBounds::NYC.contains(&vehicle.location));
                prop_assert!((0.0..=100.0).contains(&vehicle.battery_level));
                prop_assert!(vehicle.battery_health.last_inspection <= now);
                prop_assert!(vehicle.battery_health.last_inspection >= now - Duration::days(90));

                let expected = classify(&vehicle.telemetry(), &thresholds);
                prop_assert_eq!(vehicle.risk_level(), expected.level);
                prop_assert_eq!(vehicle.requires_emergency_response(), expected.requires_emergency);
            }
        }
    }
}
