//! # Dashboard Analytics
//!
//! KPIs for the admin dashboard, derived from the live store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::loyalty::LoyaltyTier;
use crate::points::{Aed, Points};
use crate::store::AppState;
use crate::types::SubscriptionTier;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub invites_sent: u32,
    pub successful_referrals: u32,
    pub pending_referrals: u32,
    /// Successful referrals over invites, floored percent. Zero with no invites.
    pub conversion_rate_percent: u8,
    pub referral_credits: Points,
    pub points_outstanding: Points,
    pub total_earned: Points,
    pub total_redeemed: Points,
    pub total_spent: Aed,
    pub challenges_completed: u32,
    pub ledger_entries: u32,
    pub subscription: SubscriptionTier,
    pub loyalty_tier: LoyaltyTier,
}

impl DashboardSummary {
    pub fn from_state(state: &AppState) -> Self {
        let stats = &state.stats;
        let conversion = if stats.invites_sent == 0 {
            0
        } else {
            (u64::from(stats.successful_referrals) * 100 / u64::from(stats.invites_sent)).min(100)
        };

        DashboardSummary {
            invites_sent: stats.invites_sent,
            successful_referrals: stats.successful_referrals,
            pending_referrals: state.pending_referrals() as u32,
            conversion_rate_percent: conversion as u8,
            referral_credits: stats.referral_credits,
            points_outstanding: state.user.points,
            total_earned: state.user.total_earned,
            total_redeemed: state.user.total_redeemed,
            total_spent: stats.total_spent,
            challenges_completed: stats.challenges_completed,
            ledger_entries: state.transactions.len() as u32,
            subscription: state.user.subscription,
            loyalty_tier: LoyaltyTier::for_points(state.user.points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_seed_dashboard() {
        let summary = DashboardSummary::from_state(&AppState::seeded());
        assert_eq!(summary.invites_sent, 4);
        assert_eq!(summary.successful_referrals, 2);
        assert_eq!(summary.pending_referrals, 2);
        assert_eq!(summary.conversion_rate_percent, 50);
        assert_eq!(summary.points_outstanding, Points::new(1200));
        assert_eq!(summary.loyalty_tier, LoyaltyTier::Advocate);
    }

    #[test]
    fn test_conversion_rate_tracks_store() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        let state = AppState::seeded().add_referral(today).add_referral(today);
        let summary = DashboardSummary::from_state(&state);
        // 2 of 6
        assert_eq!(summary.conversion_rate_percent, 33);
        assert_eq!(summary.pending_referrals, 4);
    }

    #[test]
    fn test_no_invites_means_zero_rate() {
        let mut state = AppState::seeded();
        state.stats.invites_sent = 0;
        state.stats.successful_referrals = 0;
        assert_eq!(DashboardSummary::from_state(&state).conversion_rate_percent, 0);
    }
}
