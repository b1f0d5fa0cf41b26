//! Fleet Monitoring
//!
//! Owns the simulated fleet and its incidents, scans for vehicles that
//! require an emergency response, and summarizes fleet health.

mod controller;
mod scanner;
mod stats;
mod task;

pub use controller::{FleetController, SharedController};
pub use scanner::{scan, ScanReport};
pub use stats::{FleetStats, RiskBreakdown, StatusBreakdown, TypeBreakdown};
pub use task::ScanTask;

use fleet_sim::SynthError;
use incident_tracker::IncidentError;
use risk_classifier::ThresholdError;
use thiserror::Error;

/// Monitoring errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("Invalid fleet configuration: {0}")]
    Synth(#[from] SynthError),

    #[error(transparent)]
    Incident(#[from] IncidentError),

    #[error("Scan task failed: {0}")]
    TaskFailed(String),
}
