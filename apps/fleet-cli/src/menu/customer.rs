//! # Customer Menu

use std::io;

use super::manager::show_vehicles;
use super::prompt::Console;
use super::shared;
use crate::commands::rental::{end_rental, quote_rental, start_rental, ReturnOutcome};
use crate::commands::vehicle::get_vehicle;
use crate::state::{AppState, Session};
use fleet_core::{VehicleFilter, VehicleStatus};

pub(super) async fn run(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    loop {
        console.heading(&format!("Customer Menu ({})", session.user().name)).await?;
        console.say("1. Available vehicles").await?;
        console.say("2. Search vehicles (model or category)").await?;
        console.say("3. Rent a vehicle").await?;
        console.say("4. Return a vehicle").await?;
        console.say("5. Undo last action").await?;
        console.say("6. Logout").await?;

        match console.choice("Choose an option: ", 6).await? {
            1 => show_vehicles(app, console, &VehicleFilter::with_status(VehicleStatus::Available)).await?,
            2 => {
                let keyword = console.text("Keyword: ").await?;
                show_vehicles(app, console, &VehicleFilter::with_keyword(keyword)).await?
            }
            3 => rent(app, console, session).await?,
            4 => give_back(app, console, session).await?,
            5 => shared::undo(app, console, session).await?,
            _ => {
                console.say("Logged out.").await?;
                return Ok(());
            }
        }
    }
}

async fn rent(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    let id = console.text("Vehicle id to rent (e.g. M001): ").await?;
    let vehicle = match get_vehicle(&app.db, &id).await {
        Ok(vehicle) => vehicle,
        Err(e) => return console.fail(e.message).await,
    };
    if !vehicle.is_available() {
        return console.fail(format!("Vehicle {} is already rented", vehicle.id)).await;
    }

    let days = console.int("Number of days: ", 1, i64::from(i32::MAX)).await?;
    let quote = match quote_rental(&app.db, &vehicle.id, days).await {
        Ok(quote) => quote,
        Err(e) => return console.fail(e.message).await,
    };

    console
        .say(format!(
            "Renting {} ({}) for {} days, estimated total {}",
            quote.vehicle.id,
            quote.vehicle.model,
            quote.days,
            app.currency().format(quote.total)
        ))
        .await?;
    if !console.confirm("Confirm rental?").await? {
        return console.say("Rental cancelled.").await;
    }

    match start_rental(&app.db, session, &vehicle.id, days).await {
        Ok(vehicle) => {
            console
                .ok(format!(
                    "Vehicle {} rented for {} days. You can undo this.",
                    vehicle.id, vehicle.current_rental_days
                ))
                .await
        }
        Err(e) => console.fail(e.message).await,
    }
}

async fn give_back(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    let id = console.text("Vehicle id to return: ").await?;
    let vehicle = match get_vehicle(&app.db, &id).await {
        Ok(vehicle) => vehicle,
        Err(e) => return console.fail(e.message).await,
    };
    if vehicle.is_available() {
        return console
            .say(format!("Vehicle {} is already available. Nothing to return.", vehicle.id))
            .await;
    }

    console
        .say(format!("Returning {} ({}). Make sure payment is settled.", vehicle.id, vehicle.model))
        .await?;
    if !console.confirm("Confirm return?").await? {
        return console.say("Return cancelled.").await;
    }

    match end_rental(&app.db, session, &vehicle.id).await {
        Ok(ReturnOutcome::Returned(vehicle)) => {
            console
                .ok(format!("Vehicle {} returned and available again. You can undo this.", vehicle.id))
                .await
        }
        Ok(ReturnOutcome::AlreadyAvailable(vehicle)) => {
            console
                .say(format!("Vehicle {} is already available. Nothing to return.", vehicle.id))
                .await
        }
        Err(e) => console.fail(e.message).await,
    }
}
