//! # State Module
//!
//! Per-login state for the interactive session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run()                                                                  │
//! │   ├── Database      shared by every login (pool handle)                 │
//! │   ├── FleetConfig   read-only after startup                             │
//! │   └── Session       created at login, dropped at logout                 │
//! │        ├── user     who is signed in, and their role                    │
//! │        └── undo     the one reversible action of this login             │
//! │                                                                         │
//! │  The Session is passed explicitly (&mut) to every command that         │
//! │  mutates the fleet. There is no global undo slot.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod session;

pub use app::AppState;
pub use session::Session;
