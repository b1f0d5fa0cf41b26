//! Incident records and lifecycle states

use chrono::{DateTime, Utc};
use fleet_sim::{GeoPoint, Vehicle};
use risk_classifier::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of an incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    /// Opened, awaiting response
    Pending,
    /// Responders on scene
    Responded,
    /// Closed (terminal)
    Resolved,
}

impl IncidentStatus {
    /// Open incidents block new ones for the same vehicle
    pub fn is_open(&self) -> bool {
        matches!(self, IncidentStatus::Pending | IncidentStatus::Responded)
    }

    /// Only pending -> responded and responded -> resolved are allowed
    pub fn can_transition_to(&self, next: IncidentStatus) -> bool {
        matches!(
            (self, next),
            (IncidentStatus::Pending, IncidentStatus::Responded)
                | (IncidentStatus::Responded, IncidentStatus::Resolved)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "pending",
            IncidentStatus::Responded => "responded",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emergency incident with a snapshot of the vehicle at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyIncident {
    pub id: Uuid,
    pub vehicle_id: String,
    pub created_at: DateTime<Utc>,
    pub location: GeoPoint,
    pub temperature_c: f64,
    pub battery_level: f64,
    pub risk_level: RiskLevel,
    pub status: IncidentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl EmergencyIncident {
    pub(crate) fn from_vehicle(vehicle: &Vehicle, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id.clone(),
            created_at,
            location: vehicle.location,
            temperature_c: vehicle.battery_health.temperature_c,
            battery_level: vehicle.battery_level,
            risk_level: vehicle.battery_health.risk_level,
            status: IncidentStatus::Pending,
            responded_at: None,
            resolved_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        use IncidentStatus::*;

        assert!(Pending.can_transition_to(Responded));
        assert!(Responded.can_transition_to(Resolved));

        assert!(!Pending.can_transition_to(Resolved));
        assert!(!Responded.can_transition_to(Pending));
        assert!(!Resolved.can_transition_to(Responded));
        assert!(!Resolved.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_open_states() {
        assert!(IncidentStatus::Pending.is_open());
        assert!(IncidentStatus::Responded.is_open());
        assert!(!IncidentStatus::Resolved.is_open());
    }

    #[test]
    fn test_timestamps_omitted_until_set() {
        let vehicle = Vehicle::with_battery(
            "BIKE-0001",
            50.0,
            10.0,
            100,
            &risk_classifier::RiskThresholds::default(),
        );
        let incident = EmergencyIncident::from_vehicle(&vehicle, Utc::now());
        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["risk_level"], "critical");
        assert!(json.get("responded_at").is_none());
    }
}
