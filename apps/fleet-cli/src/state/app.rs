//! # Application State
//!
//! What every login shares: the database handle and the loaded config.

use tracing::info;

use crate::config::FleetConfig;
use crate::error::AppResult;
use crate::render::Currency;
use fleet_db::{Database, DbConfig};

/// Shared, read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: FleetConfig,
    currency: Currency,
}

impl AppState {
    /// Wraps an already opened database.
    pub fn new(db: Database, config: FleetConfig) -> Self {
        let currency = Currency::new(config.display.currency_symbol.clone());
        AppState { db, config, currency }
    }

    /// Opens the configured database file and applies migrations.
    pub async fn open(config: FleetConfig) -> AppResult<Self> {
        let path = config.database_path()?;
        info!(?path, "Database path determined");

        let db = Database::new(
            DbConfig::new(path).max_connections(config.database.max_connections),
        )
        .await?;
        info!("Database connected and migrations applied");

        Ok(AppState::new(db, config))
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}
