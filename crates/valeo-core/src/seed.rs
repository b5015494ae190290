//! # Seed Data
//!
//! The demo profile every session starts from.
//!
//! The seed is internally consistent: `total_earned` equals the sum of the
//! seeded ledger, and `successful_referrals` matches the converted referrals.

use chrono::NaiveDate;

use crate::points::{Aed, Points};
use crate::store::AppState;
use crate::types::{
    Referral, ReferralStatus, RewardRules, Stats, SubscriptionTier, Transaction, User,
};

/// Name of the seeded demo user.
pub const SEED_USER_NAME: &str = "Sara";

/// Starting balance of the seeded demo user.
pub const SEED_POINTS: u64 = 1200;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn referral(id: u32, status: ReferralStatus, on: NaiveDate) -> Referral {
    Referral {
        id,
        status,
        date: on,
    }
}

fn entry(id: u32, description: &str, points: i64, on: NaiveDate) -> Transaction {
    Transaction {
        id,
        description: description.to_string(),
        points,
        date: on,
        kind: None,
        status: None,
    }
}

impl AppState {
    /// The demo store with default reward rules.
    pub fn seeded() -> Self {
        Self::seeded_with(SEED_USER_NAME, Points::new(SEED_POINTS), RewardRules::default())
    }

    /// The demo store with a custom name, starting balance and rules.
    ///
    /// `total_earned` starts equal to `points` so the counters stay
    /// consistent with the balance.
    pub fn seeded_with(name: &str, points: Points, rules: RewardRules) -> Self {
        let user = User {
            name: name.to_string(),
            subscription: SubscriptionTier::Free,
            points,
            total_earned: points,
            total_redeemed: Points::zero(),
        };

        AppState {
            user,
            referrals: vec![
                referral(1, ReferralStatus::Pending, date(2025, 10, 1)),
                referral(2, ReferralStatus::Converted, date(2025, 9, 28)),
                referral(3, ReferralStatus::Pending, date(2025, 9, 25)),
                referral(4, ReferralStatus::Converted, date(2025, 9, 20)),
            ],
            transactions: vec![
                entry(1, "Referral Reward", 500, date(2025, 9, 28)),
                entry(2, "Session Completed", 200, date(2025, 9, 15)),
                entry(3, "Referral Conversion", 500, date(2025, 9, 20)),
            ],
            stats: Stats {
                invites_sent: 4,
                successful_referrals: 2,
                referral_credits: Points::new(500),
                total_spent: Aed::zero(),
                challenges_completed: 0,
            },
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values() {
        let state = AppState::seeded();
        assert_eq!(state.user.name, "Sara");
        assert_eq!(state.user.subscription, SubscriptionTier::Free);
        assert_eq!(state.user.points, Points::new(1200));
        assert_eq!(state.referrals.len(), 4);
        assert_eq!(state.transactions.len(), 3);
        assert_eq!(state.stats.invites_sent, 4);
    }

    #[test]
    fn test_seed_is_consistent() {
        let state = AppState::seeded();
        let ledger: i64 = state.transactions.iter().map(|t| t.points).sum();
        assert_eq!(ledger, state.user.total_earned.as_credit());

        let converted = state
            .referrals
            .iter()
            .filter(|r| r.status == ReferralStatus::Converted)
            .count();
        assert_eq!(converted as u32, state.stats.successful_referrals);
    }

    #[test]
    fn test_seeded_with_overrides() {
        let state = AppState::seeded_with("Omar", Points::new(50), RewardRules::default());
        assert_eq!(state.user.name, "Omar");
        assert_eq!(state.user.points, Points::new(50));
        assert_eq!(state.user.total_earned, Points::new(50));
    }
}
