//! # Session Configuration
//!
//! Configuration management for the fleet session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Configuration Loading Order                           │
//! │                                                                         │
//! │  1. Defaults              (compiled in)                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. fleet.toml            FLEET_CONFIG, or the platform config dir     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Environment           FLEET_DB_PATH, FLEET_LOGIN_ATTEMPTS, ...     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. validate()                                                          │
//! │                                                                         │
//! │  Later sources override earlier ones.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # fleet.toml
//! [database]
//! path = "/var/lib/fleet/fleet.db"
//! max_connections = 4
//!
//! [session]
//! login_attempts = 3
//! seed_default_users = true
//!
//! [display]
//! currency_symbol = "Rp"
//!
//! [export]
//! directory = "/home/manager/reports"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a data directory for the database")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the fleet database lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Default: `<data dir>/fleet.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pool size. Default: 4
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Login behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Failed logins allowed before returning to the main menu.
    /// Default: 3
    #[serde(default = "default_login_attempts")]
    pub login_attempts: u32,

    /// Create the default manager and customer accounts when missing.
    /// Default: true
    #[serde(default = "default_true")]
    pub seed_default_users: bool,
}

fn default_login_attempts() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            login_attempts: default_login_attempts(),
            seed_default_users: default_true(),
        }
    }
}

/// How amounts are shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "Rp".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Statistics report export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Where `rental_stats_*` report folders go. Default: current directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

// =============================================================================
// Fleet Config
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl FleetConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `FLEET_CONFIG`, else platform dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML file; a missing file yields defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading fleet config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.session.login_attempts == 0 {
            return Err(ConfigError::Invalid(
                "session.login_attempts must be greater than 0".into(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `FLEET_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FLEET_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(attempts) = lookup("FLEET_LOGIN_ATTEMPTS") {
            match attempts.parse::<u32>() {
                Ok(n) => self.session.login_attempts = n,
                Err(_) => warn!(value = %attempts, "Ignoring invalid FLEET_LOGIN_ATTEMPTS"),
            }
        }

        if let Some(seed) = lookup("FLEET_SEED_USERS") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.session.seed_default_users = true,
                "0" | "false" | "no" => self.session.seed_default_users = false,
                _ => warn!(value = %seed, "Ignoring invalid FLEET_SEED_USERS"),
            }
        }

        if let Some(symbol) = lookup("FLEET_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("FLEET_EXPORT_DIR") {
            self.export.directory = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FLEET_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "fleet", "rental")
            .map(|dirs| dirs.config_dir().join("fleet.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved database file, creating its directory if needed.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        let path = match self.database.path {
            Some(ref path) => path.clone(),
            None => directories::ProjectDirs::from("com", "fleet", "rental")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .join("fleet.db"),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(path)
    }

    /// Directory for exported reports.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
