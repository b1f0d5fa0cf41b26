//! Fleet controller owning vehicles, thresholds and incidents

use crate::scanner::{scan, ScanReport};
use crate::stats::FleetStats;
use crate::MonitorError;
use chrono::{DateTime, Utc};
use fleet_sim::{FleetSynthesizer, Vehicle};
use incident_tracker::{EmergencyIncident, IncidentError, IncidentManager};
use metrics::{counter, gauge};
use risk_classifier::RiskThresholds;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Controller shared between the scan task and its callers
pub type SharedController = Arc<RwLock<FleetController>>;

/// Owns the session state: fleet, thresholds and incident log
pub struct FleetController {
    vehicles: Vec<Vehicle>,
    thresholds: RiskThresholds,
    incidents: IncidentManager,
}

impl FleetController {
    /// Create a controller over an existing fleet. Every vehicle is
    /// re-assessed with `thresholds`, so the stored risk level and emergency
    /// flag agree with what the scanner acts on.
    pub fn new(
        mut vehicles: Vec<Vehicle>,
        thresholds: RiskThresholds,
        incidents: IncidentManager,
    ) -> Result<Self, MonitorError> {
        thresholds.validate()?;
        reassess_all(&mut vehicles, &thresholds);
        info!("Fleet controller managing {} vehicles", vehicles.len());
        Ok(Self {
            vehicles,
            thresholds,
            incidents,
        })
    }

    /// Create a controller over a freshly synthesized fleet
    pub fn from_synthesizer(
        synthesizer: &mut FleetSynthesizer,
        thresholds: RiskThresholds,
        now: DateTime<Utc>,
    ) -> Result<Self, MonitorError> {
        Self::new(synthesizer.generate(now), thresholds, IncidentManager::new())
    }

    /// Wrap for sharing with a [`crate::ScanTask`]
    pub fn into_shared(self) -> SharedController {
        Arc::new(RwLock::new(self))
    }

    /// Run one scan pass over the fleet
    pub fn scan(&mut self) -> ScanReport {
        let report = scan(&self.vehicles, &mut self.incidents);

        counter!("fleetguard_scans_total").increment(1);
        counter!("fleetguard_incidents_opened_total").increment(report.opened.len() as u64);
        gauge!("fleetguard_open_incidents").set(self.incidents.counts().open() as f64);

        if report.opened.is_empty() {
            info!(
                "Scan complete: {} vehicles, {} emergencies, no new incidents",
                report.scanned, report.emergencies
            );
        } else {
            info!(
                "Scan complete: {} vehicles, {} emergencies, {} new incidents",
                report.scanned,
                report.emergencies,
                report.opened.len()
            );
        }

        report
    }

    /// Replace the fleet and drop all incidents (session restart)
    pub fn regenerate(&mut self, synthesizer: &mut FleetSynthesizer, now: DateTime<Utc>) {
        self.vehicles = synthesizer.generate(now);
        reassess_all(&mut self.vehicles, &self.thresholds);
        self.incidents.clear();
        info!("Fleet regenerated with {} vehicles", self.vehicles.len());
    }

    pub fn mark_responded(&mut self, id: Uuid) -> Result<&EmergencyIncident, IncidentError> {
        self.incidents.mark_responded(id)
    }

    pub fn mark_resolved(&mut self, id: Uuid) -> Result<&EmergencyIncident, IncidentError> {
        self.incidents.mark_resolved(id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn incidents(&self) -> &IncidentManager {
        &self.incidents
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn stats(&self) -> FleetStats {
        FleetStats::collect(&self.vehicles, self.incidents.counts())
    }
}

fn reassess_all(vehicles: &mut [Vehicle], thresholds: &RiskThresholds) {
    for vehicle in vehicles {
        vehicle.reassess(thresholds);
    }
}
