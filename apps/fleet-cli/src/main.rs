//! # Fleet Rental Entry Point
//!
//! ```text
//! $ fleet
//! Welcome to the Fleet Rental System
//!
//! === Main Menu ===
//! 1. Login as manager
//! 2. Login as customer
//! 3. Register
//! 4. Exit
//! Choose an option:
//! ```
//!
//! Configuration: `FLEET_CONFIG` or the platform config dir (`fleet.toml`),
//! then `FLEET_*` environment variables. See `fleet_cli::config`.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs so integration tests can drive it
    fleet_cli::run().await?;
    Ok(())
}
