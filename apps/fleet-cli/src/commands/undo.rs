//! # Undo Command
//!
//! Replays the inverse of the session's last mutation, once.
//!
//! ```text
//! session.undo.take()          slot is empty from here on, success or not
//!      │
//!      ├── InsertVehicle{id}   DELETE; already gone → VehicleAlreadyAbsent
//!      │
//!      └── StatusChange{..}    write the pre-image back, whatever the row holds
//! ```

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::state::Session;
use fleet_core::{RentalState, UndoDescriptor};
use fleet_db::{Database, DbError};

/// What an undo did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// A newly added vehicle was removed.
    VehicleRemoved { id: String },

    /// The vehicle to remove was already gone; the end state is the same.
    VehicleAlreadyAbsent { id: String },

    /// A rent or return was reversed.
    StatusRestored { id: String, state: RentalState },
}

/// Description of the pending undo, for the confirmation prompt.
pub fn pending_undo(session: &Session) -> Option<String> {
    session.undo.pending().map(UndoDescriptor::describe)
}

/// Reverses the last mutation.
///
/// ## Errors
/// - `NothingToUndo` - the slot is empty
/// - `NotFound` - the vehicle of a status change no longer exists
///
/// The slot is consumed before the store is touched, so a failed undo cannot
/// be retried.
pub async fn undo_last(db: &Database, session: &mut Session) -> AppResult<UndoOutcome> {
    let descriptor = session.undo.take()?;
    debug!(?descriptor, "undo command");

    match descriptor {
        UndoDescriptor::InsertVehicle { id } => match db.vehicles().delete(&id).await {
            Ok(()) => {
                info!(id = %id, "Undo removed vehicle");
                Ok(UndoOutcome::VehicleRemoved { id })
            }
            Err(DbError::NotFound { .. }) => {
                warn!(id = %id, "Vehicle to remove was already gone");
                Ok(UndoOutcome::VehicleAlreadyAbsent { id })
            }
            Err(e) => Err(e.into()),
        },
        UndoDescriptor::StatusChange {
            id,
            prev_status,
            prev_days,
            prev_total,
        } => {
            let state = RentalState {
                status: prev_status,
                current_rental_days: prev_days,
                total_rental_count: prev_total,
            };
            db.vehicles().restore_rental_state(&id, &state).await?;

            info!(
                id = %id,
                status = %state.status,
                days = state.current_rental_days,
                total_rentals = state.total_rental_count,
                "Undo restored rental state"
            );
            Ok(UndoOutcome::StatusRestored { id, state })
        }
    }
}
