//! # valeo-core: Pure Business Logic for Valeo Wellness
//!
//! This crate is the state store behind the wellness app: user profile,
//! referrals, the points ledger and aggregate stats, plus the pure reducer
//! that mutates them. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Valeo Wellness Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Views                                   │   │
//! │  │   Referrals ── Wallet ── Subscriptions ── QR Referral ── Admin  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Console app: StoreState (owner + listeners)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reduce(&state, action, today)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ valeo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │ points  │ │  store  │ │ loyalty │ │ catalog │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - User, Referral, Transaction, Stats, tiers
//! - [`points`] - `Points` and `Aed` with integer arithmetic
//! - [`store`] - `AppState`, `Action` and the reducer
//! - [`loyalty`] - Loyalty tiers and progress
//! - [`catalog`] - Redemption options and subscription plans
//! - [`analytics`] - Admin dashboard KPIs
//! - [`seed`] - Demo profile
//! - [`validation`] - Input checks run before dispatch
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use valeo_core::{AppState, Points, ReferralStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
//! let state = AppState::seeded();
//!
//! let converted = state.convert_referral(1, today).state;
//! assert_eq!(converted.user.points, Points::new(1700));
//! assert_eq!(converted.find_referral(1).unwrap().status, ReferralStatus::Converted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod catalog;
pub mod error;
pub mod loyalty;
pub mod points;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::DashboardSummary;
pub use catalog::{PlanSummary, RedemptionKind, RedemptionOption};
pub use error::{CoreError, CoreResult, ValidationError};
pub use loyalty::{LoyaltyTier, ReferralMilestone, TierProgress};
pub use points::{Aed, Points};
pub use store::{reduce, Action, AppState, NoOpReason, Outcome, Transition};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Points credited when a referral converts to a paying customer.
pub const REFERRAL_REWARD: u64 = 500;

/// Points credited for a submitted review.
pub const REVIEW_REWARD: u64 = 500;

/// Points earned per AED spent.
pub const POINTS_PER_AED: u64 = 10;

/// Points per AED of account credit when redeeming.
pub const POINTS_PER_AED_CREDIT: u64 = 10;

/// Longest accepted ledger description or challenge name.
pub const MAX_DESCRIPTION_LEN: usize = 120;

/// Longest accepted user display name.
pub const MAX_USER_NAME_LEN: usize = 60;

/// Largest single credit accepted from a caller.
///
/// ## Business Reason
/// Guards against typos like an extra zero on a manual adjustment.
pub const MAX_EARN_POINTS: u64 = 1_000_000;

/// Largest single purchase accepted, in whole dirhams.
pub const MAX_PURCHASE_DIRHAMS: i64 = 100_000;
