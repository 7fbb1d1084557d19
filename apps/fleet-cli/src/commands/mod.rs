//! # Session Commands
//!
//! Every operation the menus can trigger, as plain async functions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── vehicle.rs  ◄─── List, filter, search, add
//! ├── rental.rs   ◄─── Quote, rent, return
//! ├── undo.rs     ◄─── Replay the inverse of the last mutation
//! ├── stats.rs    ◄─── Fleet statistics and CSV report export
//! └── user.rs     ◄─── Register, authenticate, default accounts
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu                                                                   │
//! │    │  rental::start_rental(&db, &mut session, "M001", 3)                │
//! │    ▼                                                                    │
//! │  Command                                                                │
//! │    1. read snapshot          db.vehicles().get_by_id(..)                │
//! │    2. plan                   fleet_core::fleet::plan_start_rental(..)   │
//! │    3. commit (guarded)       db.vehicles().update_rental_state(..)      │
//! │    4. record reversal        session.undo.record(..)                    │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  Result<Vehicle, AppError>  → menu renders or prints the error         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 4 only runs after step 3 succeeded, so a failed write never leaves a
//! reversal behind for something that did not happen.

pub mod rental;
pub mod stats;
pub mod undo;
pub mod user;
pub mod vehicle;
