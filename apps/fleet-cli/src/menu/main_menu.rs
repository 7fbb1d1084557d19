//! # Main Menu
//!
//! ```text
//! ┌──────────────────────────┐
//! │ 1. Login as manager      │──► login ── role is manager ──► manager menu
//! │ 2. Login as customer     │──► login ── role is customer ─► customer menu
//! │ 3. Register              │
//! │ 4. Exit                  │
//! └──────────────────────────┘
//! ```
//!
//! A login opens a fresh [`Session`]; logging out drops it, and with it the
//! undo slot.

use std::io;

use tracing::warn;

use super::prompt::Console;
use super::{customer, manager, shared};
use crate::commands::user::authenticate;
use crate::state::{AppState, Session};
use fleet_core::{Role, User};

/// Runs the main menu until the user exits.
pub async fn run(app: &AppState, console: &mut Console) -> io::Result<()> {
    console.say("Welcome to the Fleet Rental System").await?;

    loop {
        console.heading("Main Menu").await?;
        console.say("1. Login as manager").await?;
        console.say("2. Login as customer").await?;
        console.say("3. Register").await?;
        console.say("4. Exit").await?;

        match console.choice("Choose an option: ", 4).await? {
            1 => {
                if let Some(user) = login(app, console, Role::Manager).await? {
                    let mut session = Session::new(user);
                    manager::run(app, console, &mut session).await?;
                }
            }
            2 => {
                if let Some(user) = login(app, console, Role::Customer).await? {
                    let mut session = Session::new(user);
                    customer::run(app, console, &mut session).await?;
                }
            }
            3 => shared::register(app, console).await?,
            _ => {
                console.say("Thank you. Goodbye.").await?;
                return Ok(());
            }
        }
    }
}

/// Asks for credentials up to the configured number of times.
///
/// Returns `None` when the attempts run out, or when the account exists but
/// has a different role than the menu that was chosen.
async fn login(app: &AppState, console: &mut Console, role: Role) -> io::Result<Option<User>> {
    console.heading(&format!("Login ({})", role)).await?;

    let mut remaining = app.config.session.login_attempts;
    while remaining > 0 {
        let email = console.text("Email: ").await?;
        let password = console.password("Password: ").await?;

        match authenticate(&app.db, &email, &password).await {
            Ok(Some(user)) if user.role == role => {
                console.ok(format!("Welcome, {} ({})", user.name, user.role)).await?;
                return Ok(Some(user));
            }
            Ok(Some(user)) => {
                console.fail(format!("This account is not a {} account", role)).await?;
                warn!(id = %user.id, wanted = %role, actual = %user.role, "Login to the wrong menu");
                return Ok(None);
            }
            Ok(None) => {
                remaining -= 1;
                console
                    .fail(format!("Invalid email or password. Attempts left: {}", remaining))
                    .await?;
            }
            Err(e) => {
                console.fail(e.message).await?;
                return Ok(None);
            }
        }
    }

    console.fail("Too many failed login attempts").await?;
    Ok(None)
}
