//! Fleet Telemetry Synthesizer
//!
//! Generates a bounded set of e-bikes and scooters placed inside a
//! geographic bounding box, with plausible battery telemetry and a risk
//! assessment derived from it.

mod synthesizer;
mod vehicle;

pub use synthesizer::{FleetSynthesizer, GeoBounds, SynthConfig};
pub use vehicle::{BatteryHealth, GeoPoint, Vehicle, VehicleStatus, VehicleType};

use thiserror::Error;

/// Synthesizer configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("Fleet size must be positive")]
    EmptyFleet,

    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidRatio { field: &'static str, value: f64 },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
}
