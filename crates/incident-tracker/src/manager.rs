//! Incident Lifecycle Manager

use crate::clock::{Clock, SystemClock};
use crate::incident::{EmergencyIncident, IncidentStatus};
use crate::IncidentError;
use fleet_sim::Vehicle;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Incident totals by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncidentCounts {
    pub pending: usize,
    pub responded: usize,
    pub resolved: usize,
}

impl IncidentCounts {
    pub fn open(&self) -> usize {
        self.pending + self.responded
    }

    pub fn total(&self) -> usize {
        self.pending + self.responded + self.resolved
    }
}

/// Incident manager with per-vehicle deduplication
pub struct IncidentManager {
    /// All incidents in creation order
    incidents: Vec<EmergencyIncident>,
    /// Position of each incident in `incidents`
    index: HashMap<Uuid, usize>,
    /// Open incident per vehicle id
    open_by_vehicle: HashMap<String, Uuid>,
    /// Timestamp source
    clock: Arc<dyn Clock>,
}

impl IncidentManager {
    /// Create an empty manager using the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty manager with a custom time source
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            incidents: Vec::new(),
            index: HashMap::new(),
            open_by_vehicle: HashMap::new(),
            clock,
        }
    }

    /// Open a pending incident for the vehicle.
    ///
    /// Returns `None` without touching state if the vehicle already has an
    /// open incident.
    pub fn open(&mut self, vehicle: &Vehicle) -> Option<Uuid> {
        if let Some(existing) = self.open_by_vehicle.get(&vehicle.id) {
            debug!("Incident suppressed: {} already has open incident {}", vehicle.id, existing);
            return None;
        }

        let incident = EmergencyIncident::from_vehicle(vehicle, self.clock.now());
        let id = incident.id;

        warn!(
            "EMERGENCY: {} at ({:.4}, {:.4}) {:.1}°C, {}% charge, risk {}. Dispatching fire department",
            incident.vehicle_id,
            incident.location.lat,
            incident.location.lon,
            incident.temperature_c,
            incident.battery_level,
            incident.risk_level
        );

        self.index.insert(id, self.incidents.len());
        self.open_by_vehicle.insert(vehicle.id.clone(), id);
        self.incidents.push(incident);

        Some(id)
    }

    /// Mark a pending incident as responded
    pub fn mark_responded(&mut self, id: Uuid) -> Result<&EmergencyIncident, IncidentError> {
        self.transition(id, IncidentStatus::Responded)
    }

    /// Mark a responded incident as resolved
    pub fn mark_resolved(&mut self, id: Uuid) -> Result<&EmergencyIncident, IncidentError> {
        self.transition(id, IncidentStatus::Resolved)
    }

    fn transition(
        &mut self,
        id: Uuid,
        next: IncidentStatus,
    ) -> Result<&EmergencyIncident, IncidentError> {
        let position = *self.index.get(&id).ok_or(IncidentError::NotFound(id))?;
        let now = self.clock.now();
        let incident = &mut self.incidents[position];

        if !incident.status.can_transition_to(next) {
            warn!(
                "Rejected transition for incident {}: {} -> {}",
                id, incident.status, next
            );
            return Err(IncidentError::InvalidTransition {
                id,
                from: incident.status,
                to: next,
            });
        }

        incident.status = next;
        match next {
            IncidentStatus::Responded => incident.responded_at = Some(now),
            IncidentStatus::Resolved => {
                incident.resolved_at = Some(now);
                self.open_by_vehicle.remove(&incident.vehicle_id);
            }
            IncidentStatus::Pending => {}
        }

        info!("Incident {} ({}) is now {}", id, incident.vehicle_id, next);
        Ok(incident)
    }

    /// Look up an incident
    pub fn get(&self, id: Uuid) -> Option<&EmergencyIncident> {
        self.index.get(&id).map(|&position| &self.incidents[position])
    }

    /// All incidents in creation order
    pub fn incidents(&self) -> &[EmergencyIncident] {
        &self.incidents
    }

    /// Pending and responded incidents
    pub fn open_incidents(&self) -> impl Iterator<Item = &EmergencyIncident> {
        self.incidents.iter().filter(|incident| incident.is_open())
    }

    /// Open incident for a vehicle, if any
    pub fn open_for_vehicle(&self, vehicle_id: &str) -> Option<&EmergencyIncident> {
        self.open_by_vehicle
            .get(vehicle_id)
            .and_then(|&id| self.get(id))
    }

    pub fn has_open(&self, vehicle_id: &str) -> bool {
        self.open_by_vehicle.contains_key(vehicle_id)
    }

    /// Totals by status
    pub fn counts(&self) -> IncidentCounts {
        self.incidents
            .iter()
            .fold(IncidentCounts::default(), |mut counts, incident| {
                match incident.status {
                    IncidentStatus::Pending => counts.pending += 1,
                    IncidentStatus::Responded => counts.responded += 1,
                    IncidentStatus::Resolved => counts.resolved += 1,
                }
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Drop every incident (session restart)
    pub fn clear(&mut self) {
        info!("Clearing {} incidents", self.incidents.len());
        self.incidents.clear();
        self.index.clear();
        self.open_by_vehicle.clear();
    }
}

impl Default for IncidentManager {
    fn default() -> Self {
        Self::new()
    }
}
