//! # Opening the Fleet Store
//!
//! [`DbConfig`] says where the fleet lives and how many connections a
//! session may hold; [`Database`] owns the resulting pool and hands out
//! repositories.
//!
//! ```text
//!   DbConfig::new("<data dir>/fleet.db")        DbConfig::in_memory()
//!            │                                          │
//!            │  Storage::File                           │  Storage::Memory
//!            ▼                                          ▼
//!   rwc, WAL, synchronous=NORMAL,               one private connection,
//!   foreign keys, busy timeout                  never shared between tests
//!            │                                          │
//!            └──────────────────┬───────────────────────┘
//!                               ▼
//!                      Database::new(config)
//!                               │  migrations (unless skipped)
//!                               ▼
//!                 db.vehicles()        db.users()
//! ```
//!
//! A session awaits one store call at a time. The pool mostly exists so the
//! `seed` binary and a running session can share the file without stepping
//! on each other; WAL keeps readers off the writer's lock.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::user::UserRepository;
use crate::repository::vehicle::VehicleRepository;

/// Where the fleet records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// A database file, created on first open.
    File(PathBuf),
    /// A throwaway database that disappears with its connection.
    Memory,
}

/// How to open the fleet store.
///
/// ```rust,ignore
/// let config = DbConfig::new(data_dir.join("fleet.db")).max_connections(2);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub storage: Storage,
    /// Upper bound on open connections (default 4).
    pub max_connections: u32,
    /// How long a caller waits for a free connection before
    /// [`DbError::PoolExhausted`].
    pub acquire_timeout: Duration,
    /// How long SQLite itself retries a locked file before failing a write.
    pub busy_timeout: Duration,
    pub migrate: bool,
}

impl DbConfig {
    /// A file-backed store. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            storage: Storage::File(path.into()),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    /// An empty, migrated store private to the caller. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig {
            storage: Storage::Memory,
            // every connection to :memory: is its own database
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(1),
            migrate: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Opens the store without touching its schema.
    pub fn skip_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.storage {
            Storage::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            Storage::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };

        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }

    fn describe(&self) -> String {
        match &self.storage {
            Storage::File(path) => path.display().to_string(),
            Storage::Memory => ":memory:".to_string(),
        }
    }
}

/// Handle to the fleet store.
///
/// Clones share one pool, so the session and each command can keep their
/// own copy.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (and by default migrates) the store described by `config`.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let location = config.describe();
        info!(location = %location, "Opening fleet store");

        let options = config.connect_options()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(format!("{}: {}", location, e)))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Brings the schema up to date. Safe to call on a current store.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool access for queries the repositories don't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn vehicles(&self) -> VehicleRepository {
        VehicleRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Closes every connection. Later calls fail as unavailable.
    pub async fn close(&self) {
        info!("Closing fleet store");
        self.pool.close().await;
    }

    /// True if the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_usable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
        assert_eq!(db.vehicles().count().await.unwrap(), 0);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/fleet.db")
            .max_connections(0)
            .acquire_timeout(Duration::from_secs(2))
            .skip_migrations();

        assert_eq!(config.storage, Storage::File(PathBuf::from("/tmp/fleet.db")));
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));
        assert!(!config.migrate);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(reopened.health_check().await);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.vehicles().count().await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
