//! # State Module
//!
//! Application state for the console.
//!
//! Two separate state types, each passed only to the handlers that need it:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Shell loop                                 │   │
//! │  │  let config = ConfigState::load(path)?;                         │   │
//! │  │  let mut store = StoreState::from_config(&config, clock);       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                          │
//! │               ▼                             ▼                           │
//! │  ┌────────────────────────┐    ┌────────────────────────┐              │
//! │  │      StoreState        │    │      ConfigState       │              │
//! │  │                        │    │                        │              │
//! │  │  AppState              │    │  user_name             │              │
//! │  │  Clock                 │    │  starting_points       │              │
//! │  │  listeners             │    │  [rewards]             │              │
//! │  └────────────────────────┘    └────────────────────────┘              │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • StoreState: owned by the shell, borrowed mutably per command        │
//! │  • ConfigState: read-only after load                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::{ConfigError, ConfigResult, ConfigState, RewardsConfig, DEFAULT_LOG_FILTER};
pub use store::{Clock, FixedClock, ListenerId, StoreState, SystemClock};
