//! # Configuration State
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VALEO_USER_NAME=Omar                                               │
//! │     VALEO_STARTING_POINTS=2500                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/valeo-wellness/valeo.toml (Linux)                        │
//! │     ~/Library/Application Support/com.valeo.wellness/valeo.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The seeded demo profile                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # valeo.toml
//! user_name = "Sara"
//! starting_points = 1200
//! currency_code = "AED"
//! log_filter = "info,valeo=debug"
//! pretty_json = false
//!
//! [rewards]
//! referral_reward = 500
//! review_reward = 500
//! points_per_aed = 10
//! points_per_aed_credit = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use valeo_core::seed::{SEED_POINTS, SEED_USER_NAME};
use valeo_core::validation::validate_user_name;
use valeo_core::{Points, RewardRules, MAX_EARN_POINTS};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,valeo=debug";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config Types
// =============================================================================

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Display name of the demo user.
    pub user_name: String,

    /// Balance the session starts with.
    pub starting_points: u64,

    /// Currency code (ISO 4217). Only AED is supported.
    pub currency_code: String,

    /// Tracing filter directive; `RUST_LOG` still wins.
    pub log_filter: String,

    /// Indent JSON replies.
    pub pretty_json: bool,

    pub rewards: RewardsConfig,
}

/// Reward amounts and exchange rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    pub referral_reward: u64,
    pub review_reward: u64,
    pub points_per_aed: u64,
    pub points_per_aed_credit: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            user_name: SEED_USER_NAME.to_string(),
            starting_points: SEED_POINTS,
            currency_code: "AED".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty_json: false,
            rewards: RewardsConfig::default(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        let rules = RewardRules::default();
        RewardsConfig {
            referral_reward: rules.referral_reward.value(),
            review_reward: rules.review_reward.value(),
            points_per_aed: rules.points_per_aed,
            points_per_aed_credit: rules.points_per_aed_credit,
        }
    }
}

impl From<RewardsConfig> for RewardRules {
    fn from(config: RewardsConfig) -> Self {
        RewardRules {
            referral_reward: Points::new(config.referral_reward),
            review_reward: Points::new(config.review_reward),
            points_per_aed: config.points_per_aed,
            points_per_aed_credit: config.points_per_aed_credit,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl ConfigState {
    /// Loads configuration: file, then environment, then validation.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `VALEO_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers and booleans are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("VALEO_USER_NAME") {
            self.user_name = name;
        }

        if let Some(code) = lookup("VALEO_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(filter) = lookup("VALEO_LOG_FILTER") {
            self.log_filter = filter;
        }

        override_parsed(&lookup, "VALEO_STARTING_POINTS", &mut self.starting_points);
        override_parsed(&lookup, "VALEO_PRETTY_JSON", &mut self.pretty_json);
        override_parsed(
            &lookup,
            "VALEO_REFERRAL_REWARD",
            &mut self.rewards.referral_reward,
        );
        override_parsed(&lookup, "VALEO_REVIEW_REWARD", &mut self.rewards.review_reward);
        override_parsed(&lookup, "VALEO_POINTS_PER_AED", &mut self.rewards.points_per_aed);
        override_parsed(
            &lookup,
            "VALEO_POINTS_PER_AED_CREDIT",
            &mut self.rewards.points_per_aed_credit,
        );
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_user_name(&self.user_name)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.currency_code != "AED" {
            return Err(ConfigError::Invalid(format!(
                "currency_code must be AED, got: {}",
                self.currency_code
            )));
        }

        if self.starting_points > MAX_EARN_POINTS {
            return Err(ConfigError::Invalid(format!(
                "starting_points must be at most {}",
                MAX_EARN_POINTS
            )));
        }

        // Both rates divide.
        if self.rewards.points_per_aed == 0 || self.rewards.points_per_aed_credit == 0 {
            return Err(ConfigError::Invalid(
                "points_per_aed and points_per_aed_credit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Reward rules for the store.
    pub fn reward_rules(&self) -> RewardRules {
        self.rewards.into()
    }

    /// Platform config location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "valeo", "wellness")
            .map(|dirs| dirs.config_dir().join("valeo.toml"))
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(key, value = %raw, "Ignoring unparseable override"),
        }
    }
}
