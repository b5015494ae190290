//! # Valeo Console Library
//!
//! Application layer for the Valeo Wellness store: loads configuration,
//! initializes logging, owns the store and serves the line shell.
//!
//! ## Module Organization
//! ```text
//! valeo_console_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── Line parsing and JSON replies
//! ├── feedback.rs     ◄─── Toasts and celebrations
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── StoreState: AppState + clock + listeners
//! │   └── config.rs   ◄─── ConfigState: env > toml > defaults
//! ├── commands/
//! │   ├── mod.rs      ◄─── CommandResponse
//! │   ├── referral.rs ◄─── Referral hub commands
//! │   ├── wallet.rs   ◄─── Wallet commands
//! │   └── ...
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod feedback;
pub mod shell;
pub mod state;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use shell::Shell;
use state::{ConfigState, FixedClock, StoreState, SystemClock};

/// Valeo Wellness store shell.
///
/// Reads commands (one per line) from stdin or a script and prints one JSON
/// reply per command. Type `help` for the command list.
#[derive(Debug, Parser)]
#[command(name = "valeo-console", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir, valeo.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Indent JSON replies
    #[arg(long)]
    pub pretty: bool,

    /// Pin the store date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Runs a shell session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config, else the platform config dir                            │
/// │     • VALEO_* environment overrides, then validation                    │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else log_filter from config                             │
/// │     • Written to stderr so stdout stays JSON                            │
/// │                                                                         │
/// │  3. Seed the Store ───────────────────────────────────────────────────► │
/// │     • Demo profile with configured name, balance and rewards            │
/// │     • Fixed clock when --today is given                                 │
/// │                                                                         │
/// │  4. Serve Lines ──────────────────────────────────────────────────────► │
/// │     • Until EOF or `quit`                                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> Result<(), ApiError> {
    let config = ConfigState::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter);

    info!(user = %config.user_name, "Starting Valeo Wellness console");

    let mut store = match cli.today {
        Some(today) => StoreState::from_config(&config, FixedClock(today)),
        None => StoreState::from_config(&config, SystemClock),
    };
    store.subscribe(|state, action| {
        debug!(
            action = action.name(),
            points = state.user.points.value(),
            ledger = state.transactions.len(),
            "State published"
        );
    });

    let mut shell = Shell::new(store, config).pretty(cli.pretty);
    let stdout = io::stdout();

    let replies = match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                ApiError::bad_command(format!("Cannot open script {}: {}", path.display(), e))
            })?;
            shell.run(BufReader::new(file), stdout.lock())
        }
        None => shell.run(io::stdin().lock(), stdout.lock()),
    }
    .map_err(|e| ApiError::internal(format!("I/O error: {}", e)))?;

    info!(replies, "Session finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=valeo=trace` - Show trace for valeo crates only
/// - Default: the configured `log_filter`
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
