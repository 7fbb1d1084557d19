//! # Seed Data Generator
//!
//! Populates a database with a demo fleet built from the recommended catalog.
//!
//! ## Usage
//! ```bash
//! # One vehicle per catalog model (15)
//! cargo run -p fleet-db --bin seed
//!
//! # Custom amount (cycles through the catalog)
//! cargo run -p fleet-db --bin seed -- --count 40
//!
//! # Specify database path
//! cargo run -p fleet-db --bin seed -- --db ./data/fleet.db
//! ```
//!
//! Every third vehicle is put out on a rental so the statistics screen has
//! something to show.

use chrono::Utc;
use std::env;

use fleet_core::catalog::RECOMMENDED_MODELS;
use fleet_core::fleet::{build_vehicle, plan_start_rental, NewVehicle};
use fleet_core::ids::{next_id, Namespace};
use fleet_core::Money;
use fleet_db::migrations::migration_status;
use fleet_db::{Database, DbConfig};

/// Base daily price per category, in major units.
const BASE_PRICES: &[(&str, i64)] = &[
    ("Hatchback", 250_000),
    ("MPV", 350_000),
    ("Sedan", 450_000),
    ("SUV", 600_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = RECOMMENDED_MODELS.len();
    let mut db_path = String::from("./fleet_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(RECOMMENDED_MODELS.len());
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fleet Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of vehicles to generate (default: 15)");
                println!("  -d, --db <PATH>    Database file path (default: ./fleet_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Fleet Rental Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Vehicles: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let (embedded, applied) = migration_status(db.pool()).await?;
    println!("✓ Connected, schema at {}/{} migrations", applied, embedded);

    let existing = db.vehicles().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} vehicles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating vehicles...");

    let mut last_id: Option<String> = None;
    let mut generated = 0;
    let mut rented = 0;

    for (seq, entry) in RECOMMENDED_MODELS.iter().cycle().take(count).enumerate() {
        let id = next_id(Namespace::Vehicle, last_id.as_deref());
        let draft = NewVehicle::new(entry.model, entry.category, daily_price(entry.category, seq));
        let mut vehicle = build_vehicle(id, &draft, Utc::now())?;

        if seq % 3 == 2 {
            plan_start_rental(&vehicle, (seq % 7) as i64 + 1)?.apply_to(&mut vehicle);
            rented += 1;
        }

        if let Err(e) = db.vehicles().insert(&vehicle).await {
            eprintln!("Failed to insert {}: {}", vehicle.id, e);
            continue;
        }

        last_id = Some(vehicle.id);
        generated += 1;
    }

    println!("✓ Generated {} vehicles ({} out on rental)", generated, rented);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Category base price plus a small per-vehicle spread.
fn daily_price(category: &str, seq: usize) -> Money {
    let base = BASE_PRICES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, p)| *p)
        .unwrap_or(300_000);
    Money::from_major(base + (seq % 5) as i64 * 25_000)
}
