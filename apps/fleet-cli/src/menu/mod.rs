//! # Menus
//!
//! The interactive session: a main menu, then one menu per role.
//!
//! ```text
//! menu/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── prompt.rs     ◄─── Console: typed, re-asking prompts
//! ├── main_menu.rs  ◄─── Login (role gated), register, exit
//! ├── manager.rs    ◄─── Fleet listing, add, statistics, users
//! ├── customer.rs   ◄─── Browse, search, rent, return
//! └── shared.rs     ◄─── Registration form and undo, used by several menus
//! ```
//!
//! Menu functions return `io::Result`: command failures are printed and the
//! menu shown again, only terminal I/O errors (including end of input) leave
//! the loop.

mod customer;
mod main_menu;
mod manager;
mod prompt;
mod shared;

pub use main_menu::run;
pub use prompt::Console;
