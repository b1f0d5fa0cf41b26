//! Threshold Error Types

use thiserror::Error;

/// Errors raised when a threshold set is inconsistent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// Threshold is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// Percentage outside [0, 100]
    #[error("{field} value {value} is out of range [0, 100]")]
    OutOfRange { field: &'static str, value: f64 },

    /// A more severe threshold is less strict than a milder one
    #[error("{stricter} ({stricter_value}) must not be below {milder} ({milder_value})")]
    Ordering {
        stricter: &'static str,
        stricter_value: f64,
        milder: &'static str,
        milder_value: f64,
    },
}
