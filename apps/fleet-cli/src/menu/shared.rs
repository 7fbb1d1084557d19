//! Menu actions offered to more than one role.

use std::io;

use super::prompt::Console;
use crate::commands::undo::{pending_undo, undo_last, UndoOutcome};
use crate::commands::user::{register_user, NewUser};
use crate::state::{AppState, Session};
use fleet_core::Role;

/// Registration form. The role is asked for, as accounts are created both
/// from the main menu and by managers.
pub(super) async fn register(app: &AppState, console: &mut Console) -> io::Result<()> {
    console.heading("Register").await?;

    let name = console.text("Full name: ").await?;
    let email = console.text("Email: ").await?;
    let password = console.password("Password: ").await?;
    let roles = [Role::Manager.to_string(), Role::Customer.to_string()];
    let role = match console.pick("Role (manager/customer): ", &roles).await?.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return console.fail(e).await,
    };

    let form = NewUser {
        name,
        email,
        password,
        role,
    };
    match register_user(&app.db, &form).await {
        Ok(user) => {
            console
                .ok(format!(
                    "Registered {} as {} ({}). You can now log in with this email.",
                    user.name, user.id, user.role
                ))
                .await
        }
        Err(e) => console.fail(e.message).await,
    }
}

/// Shows the pending undo, asks, and replays it.
pub(super) async fn undo(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    let Some(description) = pending_undo(session) else {
        return console.fail("Nothing to undo").await;
    };

    console.say(format!("Last action: {}", description)).await?;
    if !console.confirm("Undo it?").await? {
        return console.say("Undo cancelled.").await;
    }

    match undo_last(&app.db, session).await {
        Ok(UndoOutcome::VehicleRemoved { id }) => console.ok(format!("Vehicle {} removed", id)).await,
        Ok(UndoOutcome::VehicleAlreadyAbsent { id }) => {
            console.ok(format!("Vehicle {} was already removed", id)).await
        }
        Ok(UndoOutcome::StatusRestored { id, state }) => {
            console
                .ok(format!(
                    "Vehicle {} restored to {} (rental days {}, total rentals {})",
                    id, state.status, state.current_rental_days, state.total_rental_count
                ))
                .await
        }
        Err(e) => console.fail(e.message).await,
    }
}
