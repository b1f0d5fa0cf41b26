//! Emergency Incident Tracking
//!
//! Opens incidents for vehicles that require an emergency response,
//! deduplicated per vehicle, and moves them through the
//! pending -> responded -> resolved lifecycle.

mod clock;
mod incident;
mod manager;

pub use clock::{Clock, FixedClock, SystemClock};
pub use incident::{EmergencyIncident, IncidentStatus};
pub use manager::{IncidentCounts, IncidentManager};

use thiserror::Error;
use uuid::Uuid;

/// Incident lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncidentError {
    #[error("Incident {0} not found")]
    NotFound(Uuid),

    #[error("Incident {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: IncidentStatus,
        to: IncidentStatus,
    },
}
