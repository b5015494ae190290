//! # Domain Types
//!
//! Core domain types held by the Valeo Wellness store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Referral     │   │   Transaction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (seq)       │   │  id (seq)       │       │
//! │  │  subscription   │   │  status         │   │  description    │       │
//! │  │  points         │   │  date           │   │  points (±)     │       │
//! │  │  total_earned   │   └─────────────────┘   │  kind, status   │       │
//! │  │  total_redeemed │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SubscriptionTier│   │ ReferralStatus  │   │     Stats       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Free, Premium  │   │  Pending ──►    │   │  invites_sent   │       │
//! │  │  Elite, ...     │   │  Converted      │   │  successful ... │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Spelling
//! Field names serialize in camelCase and enum variants keep the spelling the
//! web views already use (`"Pending"`, `"free"`, `"elite-family"`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::points::{Aed, Points};

// =============================================================================
// Subscription Tier
// =============================================================================

/// The plan a user is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionTier {
    /// Explorer plan, no charge.
    #[default]
    Free,
    Premium,
    Elite,
    EliteFamily,
    Corporate,
}

impl SubscriptionTier {
    /// Every tier, cheapest first.
    pub const ALL: [SubscriptionTier; 5] = [
        SubscriptionTier::Free,
        SubscriptionTier::Premium,
        SubscriptionTier::Elite,
        SubscriptionTier::EliteFamily,
        SubscriptionTier::Corporate,
    ];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Numeric rank for ordering plans on the subscriptions page.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Free => 0,
            SubscriptionTier::Premium => 1,
            SubscriptionTier::Elite => 2,
            SubscriptionTier::EliteFamily => 3,
            SubscriptionTier::Corporate => 4,
        }
    }

    /// Wire spelling of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
            SubscriptionTier::Elite => "elite",
            SubscriptionTier::EliteFamily => "elite-family",
            SubscriptionTier::Corporate => "corporate",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "free" | "explorer" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            "elite" => Ok(SubscriptionTier::Elite),
            "elite-family" | "family" => Ok(SubscriptionTier::EliteFamily),
            "corporate" => Ok(SubscriptionTier::Corporate),
            other => Err(ValidationError::InvalidFormat {
                field: "tier".to_string(),
                reason: format!(
                    "unknown tier '{}', expected one of: free, premium, elite, elite-family, corporate",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// The signed-in user's profile and point counters.
///
/// `total_earned` and `total_redeemed` only ever grow; `points` is the live
/// balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub subscription: SubscriptionTier,
    pub points: Points,
    pub total_earned: Points,
    pub total_redeemed: Points,
}

// =============================================================================
// Referral
// =============================================================================

/// Referral status. The only transition is `Pending` → `Converted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReferralStatus {
    /// Invite sent, friend has not become a paying customer yet.
    #[default]
    Pending,
    /// Friend became a paying customer; reward credited.
    Converted,
}

impl ReferralStatus {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, ReferralStatus::Pending)
    }
}

/// An invite sent by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Referral {
    pub id: u32,
    pub status: ReferralStatus,
    #[ts(as = "String")]
    pub date: NaiveDate,
}

// =============================================================================
// Transaction
// =============================================================================

/// What produced a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Points earned through referrals, purchases, reviews.
    Earning,
    /// Points spent on a reward.
    Redemption,
    /// Points granted for challenges and promotions.
    Bonus,
}

/// Settlement status of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
}

/// A points ledger entry. Immutable once created.
///
/// `points` is the signed delta applied to the balance: positive for
/// credits, negative for redemptions. Seed entries carry no `kind` or
/// `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u32,
    pub description: String,
    #[ts(type = "number")]
    pub points: i64,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(rename = "type", optional)]
    pub kind: Option<TransactionType>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub status: Option<TransactionStatus>,
}

// =============================================================================
// Stats
// =============================================================================

/// Aggregate counters kept alongside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub invites_sent: u32,
    pub successful_referrals: u32,
    /// Points credited through referral conversions.
    pub referral_credits: Points,
    pub total_spent: Aed,
    pub challenges_completed: u32,
}

// =============================================================================
// Reward Rules
// =============================================================================

/// Fixed exchange rates and reward amounts applied by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RewardRules {
    /// Credited when a referral converts.
    pub referral_reward: Points,
    /// Credited for a submitted review.
    pub review_reward: Points,
    /// Points earned per AED spent on sessions or orders.
    #[ts(type = "number")]
    pub points_per_aed: u64,
    /// Points needed for AED 1 of account credit.
    #[ts(type = "number")]
    pub points_per_aed_credit: u64,
}

impl Default for RewardRules {
    fn default() -> Self {
        RewardRules {
            referral_reward: Points::new(crate::REFERRAL_REWARD),
            review_reward: Points::new(crate::REVIEW_REWARD),
            points_per_aed: crate::POINTS_PER_AED,
            points_per_aed_credit: crate::POINTS_PER_AED_CREDIT,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_tier_wire_spelling() {
        let json = serde_json::to_string(&SubscriptionTier::EliteFamily).unwrap();
        assert_eq!(json, "\"elite-family\"");

        let tier: SubscriptionTier = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(tier, SubscriptionTier::Premium);
    }

    #[test]
    fn test_subscription_tier_from_str() {
        assert_eq!("Premium".parse(), Ok(SubscriptionTier::Premium));
        assert_eq!("elite_family".parse(), Ok(SubscriptionTier::EliteFamily));
        assert!("platinum".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn test_subscription_tier_rank_order() {
        let ranks: Vec<u8> = SubscriptionTier::ALL.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
        assert!(!SubscriptionTier::Free.is_paid());
        assert!(SubscriptionTier::Corporate.is_paid());
    }

    #[test]
    fn test_referral_status_serializes_pascal_case() {
        let json = serde_json::to_string(&ReferralStatus::Converted).unwrap();
        assert_eq!(json, "\"Converted\"");
    }

    #[test]
    fn test_transaction_optional_fields_skipped() {
        let tx = Transaction {
            id: 1,
            description: "Referral Reward".to_string(),
            points: 500,
            date: NaiveDate::from_ymd_opt(2025, 9, 28).unwrap(),
            kind: None,
            status: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2025-09-28");
        assert!(json.get("type").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_transaction_kind_serializes_as_type() {
        let tx = Transaction {
            id: 4,
            description: "Review Submitted".to_string(),
            points: 500,
            date: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            kind: Some(TransactionType::Earning),
            status: Some(TransactionStatus::Completed),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "earning");
        assert_eq!(json["status"], "completed");
    }

    #[test]
    fn test_transaction_binding_matches_json_keys() {
        let tx = Transaction {
            id: 4,
            description: "Review Submitted".to_string(),
            points: 500,
            date: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            kind: Some(TransactionType::Earning),
            status: Some(TransactionStatus::Completed),
        };
        let json = serde_json::to_value(&tx).unwrap();
        let decl = Transaction::decl();

        for key in json.as_object().unwrap().keys() {
            let required = format!("{}: ", key);
            let optional = format!("{}?: ", key);
            assert!(
                decl.contains(&required) || decl.contains(&optional),
                "{key} missing from {decl}"
            );
        }
        assert!(decl.contains("type?: TransactionType"));
        assert!(!decl.contains("kind"));
    }

    #[test]
    fn test_reward_rules_default() {
        let rules = RewardRules::default();
        assert_eq!(rules.referral_reward, Points::new(500));
        assert_eq!(rules.review_reward, Points::new(500));
        assert_eq!(rules.points_per_aed, 10);
        assert_eq!(rules.points_per_aed_credit, 10);
    }
}
