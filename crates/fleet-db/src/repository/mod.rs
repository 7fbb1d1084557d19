//! # Repository Module
//!
//! Database repository implementations for the rental fleet.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session command                                                       │
//! │       │                                                                 │
//! │       │  db.vehicles().update_rental_state("M001", Available, &next)   │
//! │       ▼                                                                 │
//! │  VehicleRepository                     UserRepository                  │
//! │  ├── get_by_id / exists / list         ├── get_by_email                │
//! │  ├── insert / delete                   ├── email_exists                │
//! │  ├── update_rental_state (guarded)     ├── insert                      │
//! │  ├── restore_rental_state              ├── last_id                     │
//! │  └── last_id / categories / count      └── count                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold no business rules: they map rows to typed records and
//! turn "no row matched" into [`crate::DbError::NotFound`] or
//! [`crate::DbError::Conflict`].

pub mod user;
pub mod vehicle;
