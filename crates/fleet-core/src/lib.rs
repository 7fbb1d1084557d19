//! # fleet-core
//!
//! The rules of the rental fleet, as plain functions over plain values.
//!
//! ```text
//!                 plan_start_rental (days ≥ 1)
//!        ┌───────────────────────────────────────────┐
//!        │                                           ▼
//!   ┌───────────┐                              ┌──────────┐
//!   │ Available │                              │  Rented  │
//!   │  days = 0 │                              │ days = n │
//!   └───────────┘                              └──────────┘
//!        ▲                                           │
//!        └───────────────────────────────────────────┘
//!                      plan_end_rental
//!
//!   every plan carries the pre-image (status, days, total) so the
//!   caller can record an UndoDescriptor after committing it
//! ```
//!
//! Nothing here reads a clock, a file or a socket. Callers pass in the
//! current time and the last allocated id, and persist whatever comes back.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Vehicle, User, statuses, filters)
//! - [`money`] - Money type with integer arithmetic
//! - [`ids`] - Sequential `M###` / `U###` identifiers
//! - [`fleet`] - Vehicle status transitions and their pre-images
//! - [`undo`] - Single-slot undo descriptor
//! - [`stats`] - Fleet statistics
//! - [`catalog`] - Recommended models and categories
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use fleet_core::fleet::{self, NewVehicle};
//! use fleet_core::ids::{self, Namespace};
//! use fleet_core::money::Money;
//! use fleet_core::VehicleStatus;
//!
//! let id = ids::next_id(Namespace::Vehicle, None);
//! let draft = NewVehicle::new("Model X", "SUV", Money::from_major(500_000));
//! let mut vehicle = fleet::build_vehicle(id, &draft, Utc::now()).unwrap();
//!
//! let transition = fleet::plan_start_rental(&vehicle, 3).unwrap();
//! transition.apply_to(&mut vehicle);
//!
//! assert_eq!(vehicle.id, "M001");
//! assert_eq!(vehicle.status, VehicleStatus::Rented);
//! assert_eq!(vehicle.total_rental_count, 1);
//! ```

pub mod catalog;
pub mod error;
pub mod fleet;
pub mod ids;
pub mod money;
pub mod stats;
pub mod types;
pub mod undo;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use undo::{UndoDescriptor, UndoSlot};

/// How many vehicles the ranking lists in [`stats`] keep.
pub const TOP_N: usize = 5;

/// Maximum length of free-text vehicle fields (model, category).
pub const MAX_VEHICLE_TEXT_LEN: usize = 100;
