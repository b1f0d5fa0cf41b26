//! Emergency scan pass

use fleet_sim::Vehicle;
use incident_tracker::IncidentManager;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Outcome of one scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Vehicles visited
    pub scanned: usize,
    /// Vehicles whose emergency flag is set
    pub emergencies: usize,
    /// Incidents opened by this pass, in scan order
    pub opened: Vec<Uuid>,
}

/// Open an incident for every vehicle whose stored emergency flag is set
/// and has none open. Repeating the pass on an unchanged fleet opens nothing.
pub fn scan(vehicles: &[Vehicle], incidents: &mut IncidentManager) -> ScanReport {
    let mut report = ScanReport {
        scanned: vehicles.len(),
        ..Default::default()
    };

    for vehicle in vehicles {
        if !vehicle.requires_emergency_response() {
            continue;
        }
        report.emergencies += 1;

        // open() is a no-op while the vehicle already has an open incident
        if let Some(id) = incidents.open(vehicle) {
            debug!("Opened incident {} for {}", id, vehicle.id);
            report.opened.push(id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_classifier::RiskThresholds;

    fn fleet(thresholds: &RiskThresholds) -> Vec<Vehicle> {
        vec![
            Vehicle::with_battery("BIKE-0001", 50.0, 10.0, 100, thresholds),
            Vehicle::with_battery("BIKE-0002", 30.0, 80.0, 100, thresholds),
            Vehicle::with_battery("SCOOTER-0003", 42.0, 12.0, 300, thresholds),
            Vehicle::with_battery("SCOOTER-0004", 25.0, 90.0, 950, thresholds),
        ]
    }

    #[test]
    fn test_scan_opens_for_emergencies_only() {
        let thresholds = RiskThresholds::default();
        let vehicles = fleet(&thresholds);
        let mut incidents = IncidentManager::default();

        let report = scan(&vehicles, &mut incidents);

        assert_eq!(report.scanned, 4);
        assert_eq!(report.emergencies, 2);
        assert_eq!(report.opened.len(), 2);
        assert!(incidents.has_open("BIKE-0001"));
        assert!(incidents.has_open("SCOOTER-0003"));
        // Worn but cool battery is critical without an emergency
        assert!(!incidents.has_open("SCOOTER-0004"));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let thresholds = RiskThresholds::default();
        let vehicles = fleet(&thresholds);
        let mut incidents = IncidentManager::default();

        scan(&vehicles, &mut incidents);
        let second = scan(&vehicles, &mut incidents);

        assert_eq!(second.emergencies, 2);
        assert!(second.opened.is_empty());
        assert_eq!(incidents.len(), 2);
    }

    #[test]
    fn test_creation_order_follows_scan_order() {
        let thresholds = RiskThresholds::default();
        let vehicles = fleet(&thresholds);
        let mut incidents = IncidentManager::default();

        let report = scan(&vehicles, &mut incidents);
        let ids: Vec<_> = incidents.incidents().iter().map(|i| i.id).collect();
        assert_eq!(ids, report.opened);
        assert_eq!(incidents.incidents()[0].vehicle_id, "BIKE-0001");
    }

    #[test]
    fn test_scan_reads_stored_flag() {
        let thresholds = RiskThresholds::default();
        // 43 °C is high but not an emergency under the default set
        let mut vehicles = vec![Vehicle::with_battery("BIKE-0005", 43.0, 50.0, 100, &thresholds)];
        let mut incidents = IncidentManager::default();
        assert_eq!(scan(&vehicles, &mut incidents).emergencies, 0);

        vehicles[0].reassess(&RiskThresholds::strict());
        let report = scan(&vehicles, &mut incidents);
        assert_eq!(report.emergencies, 1);
        assert_eq!(report.opened.len(), 1);
    }
}
