//! # Loyalty Rules
//!
//! Derived views over the points balance and referral counters. Nothing here
//! mutates state; the wallet and referrals pages recompute these on every
//! render.
//!
//! ## Tier Ladder
//! ```text
//!   0 ─────────── 1,000 ─────────── 5,000 ─────────── 10,000 ──────►
//!   │   Member    │    Advocate     │    Champion     │    Elite
//!   │  (/1,000)   │    (/4,000)     │    (/5,000)     │   (maxed)
//! ```
//!
//! Progress percentages use integer math and are floored.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::points::Points;

/// Successful referrals needed per referral reward tier.
pub const REFERRALS_PER_MILESTONE: u32 = 5;

// =============================================================================
// Loyalty Tier
// =============================================================================

/// Loyalty level earned by holding points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LoyaltyTier {
    Member,
    Advocate,
    Champion,
    Elite,
}

impl LoyaltyTier {
    /// Points needed to enter this tier.
    pub const fn threshold(&self) -> Points {
        match self {
            LoyaltyTier::Member => Points::new(0),
            LoyaltyTier::Advocate => Points::new(1_000),
            LoyaltyTier::Champion => Points::new(5_000),
            LoyaltyTier::Elite => Points::new(10_000),
        }
    }

    /// Tier for a balance.
    pub fn for_points(points: Points) -> Self {
        [
            LoyaltyTier::Elite,
            LoyaltyTier::Champion,
            LoyaltyTier::Advocate,
        ]
        .into_iter()
        .find(|tier| points >= tier.threshold())
        .unwrap_or(LoyaltyTier::Member)
    }

    /// The tier above this one, if any.
    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            LoyaltyTier::Member => Some(LoyaltyTier::Advocate),
            LoyaltyTier::Advocate => Some(LoyaltyTier::Champion),
            LoyaltyTier::Champion => Some(LoyaltyTier::Elite),
            LoyaltyTier::Elite => None,
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoyaltyTier::Member => write!(f, "Member"),
            LoyaltyTier::Advocate => write!(f, "Advocate"),
            LoyaltyTier::Champion => write!(f, "Champion"),
            LoyaltyTier::Elite => write!(f, "Elite"),
        }
    }
}

// =============================================================================
// Tier Progress
// =============================================================================

/// Where a balance sits between its tier and the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub tier: LoyaltyTier,
    #[ts(optional)]
    pub next_tier: Option<LoyaltyTier>,
    /// 0..=100, floored.
    pub progress_percent: u8,
    /// Points left to reach `next_tier`; zero at the top tier.
    pub points_to_next: Points,
}

impl TierProgress {
    pub fn for_points(points: Points) -> Self {
        let tier = LoyaltyTier::for_points(points);
        let Some(next) = tier.next() else {
            return TierProgress {
                tier,
                next_tier: None,
                progress_percent: 100,
                points_to_next: Points::zero(),
            };
        };

        let floor = tier.threshold().value();
        let span = next.threshold().value() - floor;
        let into = points.value().saturating_sub(floor);
        let percent = (into.saturating_mul(100) / span).min(100);

        TierProgress {
            tier,
            next_tier: Some(next),
            progress_percent: percent as u8,
            points_to_next: next.threshold().saturating_sub(points),
        }
    }
}

// =============================================================================
// Referral Milestone
// =============================================================================

/// Progress toward the next referral reward tier (every five conversions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReferralMilestone {
    pub progress_percent: u8,
    pub referrals_to_next: u32,
}

impl ReferralMilestone {
    pub fn for_successful(successful_referrals: u32) -> Self {
        let into = successful_referrals % REFERRALS_PER_MILESTONE;
        ReferralMilestone {
            progress_percent: (into * 100 / REFERRALS_PER_MILESTONE) as u8,
            referrals_to_next: REFERRALS_PER_MILESTONE - into,
        }
    }
}
