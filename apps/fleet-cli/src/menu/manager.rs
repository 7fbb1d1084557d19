//! # Manager Menu

use std::io;
use std::path::PathBuf;

use super::prompt::Console;
use super::shared;
use crate::commands::stats::{default_report_name, export_report, fleet_statistics};
use crate::commands::vehicle::{add_vehicle, list_categories, list_vehicles, next_vehicle_id};
use crate::render::{render_stats, render_vehicles};
use crate::state::{AppState, Session};
use fleet_core::catalog::{models_in_category, CatalogEntry, RECOMMENDED_CATEGORIES};
use fleet_core::fleet::NewVehicle;
use fleet_core::{VehicleFilter, VehicleStatus};

pub(super) async fn run(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    loop {
        console.heading(&format!("Manager Menu ({})", session.user().name)).await?;
        console.say("1. List all vehicles").await?;
        console.say("2. Filter vehicles").await?;
        console.say("3. Add a vehicle").await?;
        console.say("4. Statistics").await?;
        console.say("5. Register a user").await?;
        console.say("6. Undo last action").await?;
        console.say("7. Logout").await?;

        match console.choice("Choose an option: ", 7).await? {
            1 => show_vehicles(app, console, &VehicleFilter::all()).await?,
            2 => filter(app, console).await?,
            3 => add(app, console, session).await?,
            4 => statistics(app, console).await?,
            5 => shared::register(app, console).await?,
            6 => shared::undo(app, console, session).await?,
            _ => {
                console.say("Logged out.").await?;
                return Ok(());
            }
        }
    }
}

pub(super) async fn show_vehicles(app: &AppState, console: &mut Console, filter: &VehicleFilter) -> io::Result<()> {
    match list_vehicles(&app.db, filter).await {
        Ok(vehicles) => console.say(render_vehicles(&vehicles, app.currency())).await,
        Err(e) => console.fail(e.message).await,
    }
}

async fn filter(app: &AppState, console: &mut Console) -> io::Result<()> {
    console.say("Filter by:").await?;
    console.say("1. Category").await?;
    console.say("2. Status").await?;

    let filter = if console.choice("Choose an option: ", 2).await? == 1 {
        let categories = match list_categories(&app.db).await {
            Ok(categories) if categories.is_empty() => return console.say("No vehicles yet.").await,
            Ok(categories) => categories,
            Err(e) => return console.fail(e.message).await,
        };
        console.say(format!("Categories: {}", categories.join(", "))).await?;
        VehicleFilter::with_category(console.pick("Category: ", &categories).await?)
    } else {
        let statuses = [VehicleStatus::Available.to_string(), VehicleStatus::Rented.to_string()];
        match console.pick("Status (available/rented): ", &statuses).await?.parse::<VehicleStatus>() {
            Ok(status) => VehicleFilter::with_status(status),
            Err(e) => return console.fail(e).await,
        }
    };

    show_vehicles(app, console, &filter).await
}

async fn add(app: &AppState, console: &mut Console, session: &mut Session) -> io::Result<()> {
    console.heading("Add a vehicle").await?;

    match next_vehicle_id(&app.db).await {
        Ok(id) => console.say(format!("New vehicle id: {}", id)).await?,
        Err(e) => return console.fail(e.message).await,
    }

    console.say("Categories:").await?;
    for (i, category) in RECOMMENDED_CATEGORIES.iter().enumerate() {
        console.say(format!("{}. {}", i + 1, category)).await?;
    }
    let category = RECOMMENDED_CATEGORIES[console.choice("Category number: ", RECOMMENDED_CATEGORIES.len()).await? - 1];

    let models: Vec<&CatalogEntry> = models_in_category(category).collect();
    console.say("Models:").await?;
    for (i, entry) in models.iter().enumerate() {
        console.say(format!("{}. {}", i + 1, entry.model)).await?;
    }
    let entry = models[console.choice("Model number: ", models.len()).await? - 1];

    let price = console.money("Price per day: ").await?;
    let draft = NewVehicle::new(entry.model, entry.category, price);

    console
        .say(format!(
            "Model: {}, Category: {}, Price/day: {}, Status: {}",
            draft.model,
            draft.category,
            app.currency().format(price),
            VehicleStatus::Available
        ))
        .await?;
    if !console.confirm("Add this vehicle?").await? {
        return console.say("Cancelled.").await;
    }

    match add_vehicle(&app.db, session, &draft).await {
        Ok(vehicle) => {
            console
                .ok(format!(
                    "{} ({}) added with id {}. You can undo this.",
                    vehicle.model, vehicle.category, vehicle.id
                ))
                .await
        }
        Err(e) => console.fail(e.message).await,
    }
}

async fn statistics(app: &AppState, console: &mut Console) -> io::Result<()> {
    console.heading("Fleet statistics").await?;

    match fleet_statistics(&app.db).await {
        Ok(stats) => console.say(render_stats(&stats, app.currency())).await?,
        Err(e) => return console.fail(e.message).await,
    }

    if !console.confirm("Export the report as spreadsheet (CSV) sheets?").await? {
        return Ok(());
    }

    let default_dir = app.config.export_dir();
    let answer = console
        .text(&format!(
            "Report folder (Enter for {}): ",
            default_dir.join(default_report_name(chrono::Utc::now())).display()
        ))
        .await?;

    let target = if answer.is_empty() {
        if let Err(e) = tokio::fs::create_dir_all(&default_dir).await {
            return console.fail(format!("Cannot create {}: {}", default_dir.display(), e)).await;
        }
        default_dir
    } else {
        PathBuf::from(answer)
    };

    match export_report(&app.db, &target).await {
        Ok(path) => console.ok(format!("Report saved to {}", path.display())).await,
        Err(e) => console.fail(e.message).await,
    }
}
