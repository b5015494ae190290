//! # Commands Module
//!
//! Page-level handlers called by the shell.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs               ◄─── You are here (CommandResponse)
//! ├── config.rs            ◄─── Configuration retrieval
//! ├── referral.rs          ◄─── Referral hub: invite, convert, share
//! ├── internal_referral.rs ◄─── Staff QR scan
//! ├── wallet.rs            ◄─── Balance, ledger, redeem, earn
//! ├── subscription.rs      ◄─── Plans and switching
//! └── admin.rs             ◄─── Dashboard KPIs
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  > redeem credit                                                        │
//! │         │                                                               │
//! │         │ (shell parses the line)                                       │
//! │         ▼                                                               │
//! │  fn redeem(                                                             │
//! │      store: &mut StoreState,  ◄── Owned by the shell                   │
//! │      kind: RedemptionKind,    ◄── From the line                        │
//! │  ) -> Result<CommandResponse<WalletView>, ApiError>                     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{...},"feedback":[{"type":"toast",...}]}             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read handlers take `&StoreState` and return the view directly; mutating
//! handlers take `&mut StoreState` and wrap the refreshed view in a
//! [`CommandResponse`] with the feedback to show.

pub mod admin;
pub mod config;
pub mod internal_referral;
pub mod referral;
pub mod subscription;
pub mod wallet;

use serde::Serialize;

use crate::feedback::Feedback;

/// A refreshed view plus the toasts and celebrations to show with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<T> {
    pub data: T,
    pub feedback: Vec<Feedback>,
}

impl<T> CommandResponse<T> {
    pub fn new(data: T) -> Self {
        CommandResponse {
            data,
            feedback: Vec::new(),
        }
    }

    pub fn with(mut self, feedback: Feedback) -> Self {
        self.feedback.push(feedback);
        self
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use valeo_core::AppState;

    use crate::state::{FixedClock, StoreState};

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
    }

    /// Seeded store on a fixed date.
    pub fn store() -> StoreState {
        StoreState::new(AppState::seeded(), FixedClock(today()))
    }
}
