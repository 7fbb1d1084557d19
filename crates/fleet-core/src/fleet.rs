//! # Fleet State Machine
//!
//! Plans the legal moves of a vehicle between availability states.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              start_rental(days > 0)                                     │
//! │                days = d, total += 1                                     │
//! │   ┌───────────┐ ─────────────────────────► ┌──────────┐                 │
//! │   │ Available │                            │  Rented  │                 │
//! │   │  days = 0 │ ◄───────────────────────── │ days = d │                 │
//! │   └───────────┘        end_rental          └──────────┘                 │
//! │         ▲              days = 0, total unchanged                        │
//! │         │                                                               │
//! │      create (total = 0)                                                 │
//! │                                                                         │
//! │   start_rental on Rented   → RentalConflict (state untouched)           │
//! │   end_rental on Available  → nothing to do  (not an error)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Plan, Then Commit
//! Nothing here touches storage. A `plan_*` function inspects a snapshot and
//! returns a [`StatusTransition`] holding both the pre-image and the target
//! state. The caller commits it with a write guarded on the pre-image status
//! and, only once that write succeeded, records
//! [`StatusTransition::undo_descriptor`] in the session's undo slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{RentalState, Vehicle, VehicleStatus};
use crate::undo::UndoDescriptor;
use crate::validation;

// =============================================================================
// New Vehicle
// =============================================================================

/// Fields supplied when adding a vehicle. The id is allocated separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub model: String,
    pub category: String,
    pub price_per_day: Money,
}

impl NewVehicle {
    pub fn new(model: impl Into<String>, category: impl Into<String>, price_per_day: Money) -> Self {
        NewVehicle {
            model: model.into(),
            category: category.into(),
            price_per_day,
        }
    }
}

/// Validates a draft and builds the stored record: Available, no rentals.
///
/// Price is checked first, then model, then category.
pub fn build_vehicle(id: String, draft: &NewVehicle, now: DateTime<Utc>) -> CoreResult<Vehicle> {
    let price = validation::validate_price(draft.price_per_day)?;
    let model = validation::validate_model(&draft.model)?;
    let category = validation::validate_category(&draft.category)?;

    Ok(Vehicle {
        id,
        model,
        category,
        price_per_day_cents: price.cents(),
        status: VehicleStatus::Available,
        current_rental_days: 0,
        total_rental_count: 0,
        created_at: now,
        updated_at: now,
    })
}

// =============================================================================
// Status Transition
// =============================================================================

/// A planned rent or return: where the vehicle is, and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub vehicle_id: String,
    pub pre_image: RentalState,
    pub next: RentalState,
}

impl StatusTransition {
    /// Status the stored row must still have for the commit to apply.
    #[inline]
    pub fn expected_status(&self) -> VehicleStatus {
        self.pre_image.status
    }

    /// Applies the target state to an in-memory snapshot.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        vehicle.set_rental_state(self.next);
    }

    /// Reversal of this transition, to record once the commit succeeded.
    pub fn undo_descriptor(&self) -> UndoDescriptor {
        UndoDescriptor::status_change(&self.vehicle_id, self.pre_image)
    }
}

/// Plans renting `vehicle` for `days`.
///
/// ## Errors
/// - [`CoreError::RentalConflict`] if the vehicle is already rented, whatever
///   `days` is
/// - [`CoreError::Validation`] if `days <= 0`
pub fn plan_start_rental(vehicle: &Vehicle, days: i64) -> CoreResult<StatusTransition> {
    if vehicle.status == VehicleStatus::Rented {
        return Err(CoreError::RentalConflict {
            vehicle_id: vehicle.id.clone(),
            status: vehicle.status,
        });
    }
    let days = validation::validate_rental_days(days)?;

    let pre_image = vehicle.rental_state();
    Ok(StatusTransition {
        vehicle_id: vehicle.id.clone(),
        pre_image,
        next: RentalState {
            status: VehicleStatus::Rented,
            current_rental_days: days,
            total_rental_count: pre_image.total_rental_count + 1,
        },
    })
}

/// Plans returning `vehicle`.
///
/// Returns `None` when the vehicle is already available: there is nothing to
/// write and nothing to undo.
pub fn plan_end_rental(vehicle: &Vehicle) -> Option<StatusTransition> {
    if vehicle.status == VehicleStatus::Available {
        return None;
    }

    let pre_image = vehicle.rental_state();
    Some(StatusTransition {
        vehicle_id: vehicle.id.clone(),
        pre_image,
        next: RentalState {
            status: VehicleStatus::Available,
            current_rental_days: 0,
            total_rental_count: pre_image.total_rental_count,
        },
    })
}

/// True when the availability invariant holds for `vehicle`.
pub fn is_consistent(vehicle: &Vehicle) -> bool {
    vehicle.current_rental_days >= 0
        && vehicle.total_rental_count >= 0
        && (vehicle.status == VehicleStatus::Rented || vehicle.current_rental_days == 0)
}

// =============================================================================
// Unit Tests
// =============================================================================
