//! # fleet-db
//!
//! Where the fleet is written down. One SQLite file holds two tables:
//!
//! ```text
//!   vehicles                                  users
//!   ─────────────────────────────────────     ─────────────────────────────
//!   id            M001, M002, ...   PK        id        U001, ...      PK
//!   model, category, price_per_day_cents      name, email (unique), role
//!   status        available | rented          password_hash (argon2)
//!   current_rental_days  0 unless rented      created_at
//!   total_rental_count   only ever grows
//!   created_at
//! ```
//!
//! [`Database`] opens the file (see [`pool`]), applies [`migrations`], and
//! hands out [`VehicleRepository`] and [`UserRepository`]. Repositories
//! translate rows into `fleet_core` records; status changes go through
//! `update_rental_state`, which only writes when the row still holds the
//! status the caller planned from.
//!
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("fleet.db")).await?;
//! let rented = db.vehicles().list(&VehicleFilter::with_status(VehicleStatus::Rented)).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, Storage};

pub use repository::user::UserRepository;
pub use repository::vehicle::VehicleRepository;
