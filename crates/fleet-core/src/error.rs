//! # Rule Errors
//!
//! Two families: [`ValidationError`] for input that can never be accepted
//! (blank model, negative price, zero days) and [`CoreError`] for requests
//! that are well-formed but not allowed right now (renting a rented vehicle,
//! undoing with an empty slot).
//!
//! Messages name the id or field involved; the session prints them verbatim.

use thiserror::Error;

use crate::types::VehicleStatus;

/// Business rule violations raised while planning a transition or an undo.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced vehicle id does not exist.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Renting a vehicle whose status is already `Rented`.
    ///
    /// ```text
    /// plan_start_rental(M003 { status: Rented, .. }, 2)
    ///   → RentalConflict { vehicle_id: "M003", status: Rented }
    ///   → "Vehicle M003 is already rented"
    /// ```
    #[error("Vehicle {vehicle_id} is already {status}")]
    RentalConflict {
        vehicle_id: String,
        status: VehicleStatus,
    },

    /// Undo requested while the slot is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input the rules reject outright.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Rental days, for instance.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Prices may be zero but never below.
    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Roles and statuses outside their fixed sets.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_vehicle() {
        let err = CoreError::RentalConflict {
            vehicle_id: "M003".to_string(),
            status: VehicleStatus::Rented,
        };
        assert_eq!(err.to_string(), "Vehicle M003 is already rented");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("category");
        assert_eq!(err.to_string(), "category is required");

        let err = ValidationError::MustBePositive {
            field: "days".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "days must be positive, got 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("model").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
