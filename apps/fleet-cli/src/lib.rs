//! # Fleet CLI Library
//!
//! The interactive rental session: configuration, login, role menus and the
//! commands behind them. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! fleet_cli/
//! ├── lib.rs          ◄─── You are here (startup & session loop)
//! ├── config.rs       ◄─── FleetConfig: defaults → fleet.toml → FLEET_* env
//! ├── error.rs        ◄─── AppError { code, message }
//! ├── render.rs       ◄─── Tables, currency, statistics text
//! ├── state/
//! │   ├── app.rs      ◄─── AppState: database + config
//! │   └── session.rs  ◄─── Session: user + undo slot
//! ├── commands/       ◄─── vehicle, rental, undo, stats, user
//! └── menu/           ◄─── Console prompts and the three menus
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging      tracing-subscriber to stderr, RUST_LOG      │
//! │  2. Load Configuration      FleetConfig::load                          │
//! │  3. Connect to Database     SQLite, WAL, migrations                    │
//! │  4. Default Accounts        admin@rental.com, customer@rental.com      │
//! │  5. Main Menu               until Exit or end of input                 │
//! │  6. Close Pool                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod render;
pub mod state;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::user::ensure_default_users;
use config::FleetConfig;
use error::AppResult;
use menu::Console;
use state::AppState;

/// Runs the interactive session on stdin/stdout.
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting fleet rental session");

    let config = FleetConfig::load(None)?;
    let app = AppState::open(config).await?;

    let result = run_session(&app, &mut Console::stdio()).await;

    app.db.close().await;
    result
}

/// Seeds the default accounts if configured, then runs the main menu.
///
/// End of input is a normal way to leave.
pub async fn run_session(app: &AppState, console: &mut Console) -> AppResult<()> {
    if app.config.session.seed_default_users {
        ensure_default_users(&app.db).await?;
    }

    match menu::run(app, console).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            info!("Input closed, ending session");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fleet=trace` - Show trace for the fleet crates only
/// - Default: warnings, plus INFO from the fleet crates
///
/// Logs go to stderr so they never interleave with the menus on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,fleet=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
