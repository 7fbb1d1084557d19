//! # Single-Level Undo
//!
//! The session keeps exactly one reversible action: the last committed
//! mutation. A new mutation overwrites it; an undo consumes it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         UndoSlot lifecycle                              │
//! │                                                                         │
//! │   add M004 ──► [InsertVehicle M004]                                     │
//! │   rent M001 ─► [StatusChange M001 (available, 0, 2)]   (M004 forgotten) │
//! │   undo ──────► [ empty ]  + M001 written back to (available, 0, 2)      │
//! │   undo ──────► NothingToUndo                                            │
//! │                                                                         │
//! │   The slot is emptied BEFORE the inverse is replayed: a failed replay   │
//! │   still consumes it.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The descriptor only describes the inverse. Replaying it against storage is
//! the session's job.

use crate::error::{CoreError, CoreResult};
use crate::types::{RentalState, VehicleStatus};

// =============================================================================
// Undo Descriptor
// =============================================================================

/// What it takes to reverse the last mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoDescriptor {
    /// A vehicle was added; reversing deletes it.
    InsertVehicle { id: String },

    /// A rent or return happened; reversing writes the pre-image back.
    StatusChange {
        id: String,
        prev_status: VehicleStatus,
        prev_days: i64,
        prev_total: i64,
    },
}

impl UndoDescriptor {
    pub fn insert_vehicle(id: impl Into<String>) -> Self {
        UndoDescriptor::InsertVehicle { id: id.into() }
    }

    pub fn status_change(id: impl Into<String>, pre_image: RentalState) -> Self {
        UndoDescriptor::StatusChange {
            id: id.into(),
            prev_status: pre_image.status,
            prev_days: pre_image.current_rental_days,
            prev_total: pre_image.total_rental_count,
        }
    }

    pub fn vehicle_id(&self) -> &str {
        match self {
            UndoDescriptor::InsertVehicle { id } | UndoDescriptor::StatusChange { id, .. } => id,
        }
    }

    /// The state to restore, for status changes.
    pub fn pre_image(&self) -> Option<RentalState> {
        match self {
            UndoDescriptor::InsertVehicle { .. } => None,
            UndoDescriptor::StatusChange {
                prev_status,
                prev_days,
                prev_total,
                ..
            } => Some(RentalState {
                status: *prev_status,
                current_rental_days: *prev_days,
                total_rental_count: *prev_total,
            }),
        }
    }

    /// One-line description shown before the user confirms an undo.
    pub fn describe(&self) -> String {
        match self {
            UndoDescriptor::InsertVehicle { id } => format!("Remove newly added vehicle {id}"),
            UndoDescriptor::StatusChange {
                id,
                prev_status,
                prev_days,
                prev_total,
            } => format!(
                "Restore vehicle {id} to {prev_status} (rental days {prev_days}, total rentals {prev_total})"
            ),
        }
    }
}

// =============================================================================
// Undo Slot
// =============================================================================

/// Holds at most one [`UndoDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct UndoSlot {
    last: Option<UndoDescriptor>,
}

impl UndoSlot {
    pub fn new() -> Self {
        UndoSlot::default()
    }

    /// Replaces whatever was pending.
    pub fn record(&mut self, descriptor: UndoDescriptor) {
        self.last = Some(descriptor);
    }

    /// Peeks at the pending action without consuming it.
    pub fn pending(&self) -> Option<&UndoDescriptor> {
        self.last.as_ref()
    }

    /// Empties the slot and hands back its descriptor.
    pub fn take(&mut self) -> CoreResult<UndoDescriptor> {
        self.last.take().ok_or(CoreError::NothingToUndo)
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
