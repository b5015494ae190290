//! # Reward and Plan Catalogs
//!
//! Fixed facts the wallet and subscriptions pages render: what each
//! redemption costs and what each plan is called and priced at.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Redemption          Cost (VWP)    Value                                │
//! │  ──────────          ──────────    ─────                                │
//! │  Account Credit           1,000    100 AED                              │
//! │  Premium Session          5,000    700 AED value                        │
//! │  Wellness Retreat        10,000    2,500 AED+ value  (featured)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::points::{Aed, Points};
use crate::types::SubscriptionTier;

// =============================================================================
// Redemption Kind
// =============================================================================

/// A reward points can be exchanged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionKind {
    /// Account credit at the points-per-AED credit rate.
    Credit,
    /// One premium therapy session.
    Session,
    /// A wellness retreat weekend.
    Retreat,
}

impl RedemptionKind {
    /// Catalog order.
    pub const ALL: [RedemptionKind; 3] = [
        RedemptionKind::Credit,
        RedemptionKind::Session,
        RedemptionKind::Retreat,
    ];

    /// Fixed points cost of this reward.
    pub const fn cost(&self) -> Points {
        match self {
            RedemptionKind::Credit => Points::new(1_000),
            RedemptionKind::Session => Points::new(5_000),
            RedemptionKind::Retreat => Points::new(10_000),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RedemptionKind::Credit => "Account Credit",
            RedemptionKind::Session => "Premium Session",
            RedemptionKind::Retreat => "Wellness Retreat",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RedemptionKind::Credit => "Redeem for account credit",
            RedemptionKind::Session => "1 Premium Therapy Session",
            RedemptionKind::Retreat => "Exclusive Wellness Retreat Weekend",
        }
    }

    /// Human-readable value shown next to the cost.
    pub fn value_label(&self) -> &'static str {
        match self {
            RedemptionKind::Credit => "100 AED",
            RedemptionKind::Session => "700 AED value",
            RedemptionKind::Retreat => "2,500 AED+ value",
        }
    }

    /// The extra line in the reward details.
    pub fn fine_print(&self) -> &'static str {
        match self {
            RedemptionKind::Credit => "Credit never expires",
            RedemptionKind::Session => "Session valid for 6 months",
            RedemptionKind::Retreat => "Includes accommodation and meals",
        }
    }

    /// Whether the wallet highlights this option.
    pub fn is_featured(&self) -> bool {
        matches!(self, RedemptionKind::Retreat)
    }

    /// Ledger description for redeeming `amount` points as this kind.
    ///
    /// Only credit depends on the amount: it states the AED value the points
    /// bought.
    pub fn ledger_description(&self, amount: Points, points_per_aed_credit: u64) -> String {
        match self {
            RedemptionKind::Credit => format!(
                "Redeemed for {} AED Account Credit",
                amount.to_aed(points_per_aed_credit).amount_string()
            ),
            RedemptionKind::Session => "Redeemed for Premium Therapy Session".to_string(),
            RedemptionKind::Retreat => "Redeemed for Wellness Retreat Weekend".to_string(),
        }
    }

    /// Points still missing before this reward is affordable.
    pub fn shortfall(&self, balance: Points) -> Points {
        self.cost().saturating_sub(balance)
    }
}

impl fmt::Display for RedemptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedemptionKind::Credit => write!(f, "credit"),
            RedemptionKind::Session => write!(f, "session"),
            RedemptionKind::Retreat => write!(f, "retreat"),
        }
    }
}

impl FromStr for RedemptionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(RedemptionKind::Credit),
            "session" => Ok(RedemptionKind::Session),
            "retreat" => Ok(RedemptionKind::Retreat),
            other => Err(ValidationError::InvalidFormat {
                field: "reward".to_string(),
                reason: format!(
                    "unknown reward '{}', expected one of: credit, session, retreat",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Subscription Plans
// =============================================================================

impl SubscriptionTier {
    /// Marketing name of the plan.
    pub fn plan_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Explorer Plan",
            SubscriptionTier::Premium => "Premium Plan",
            SubscriptionTier::Elite => "Elite Plan",
            SubscriptionTier::EliteFamily => "Elite Family Plan",
            SubscriptionTier::Corporate => "Corporate Plan",
        }
    }

    /// Monthly price, where the plan has a published one.
    ///
    /// Elite, family and corporate plans are quoted at checkout.
    pub fn monthly_price(&self) -> Option<Aed> {
        match self {
            SubscriptionTier::Free => Some(Aed::zero()),
            SubscriptionTier::Premium => Some(Aed::from_dirhams(499)),
            _ => None,
        }
    }

    /// Feature bullets listed on the plan card.
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            SubscriptionTier::Free => &[
                "Access to Longevity Score",
                "Limited wellness content",
                "Basic health insights",
                "Community support",
            ],
            SubscriptionTier::Premium => &[
                "1 home session per month",
                "Personalized wellness plan",
                "Priority booking",
                "Advanced health analytics",
                "24/7 doctor on call access",
                "Exclusive member discounts",
            ],
            SubscriptionTier::Elite => &[
                "Everything in Premium",
                "2 home sessions per month",
                "Dedicated wellness coordinator",
            ],
            SubscriptionTier::EliteFamily => &[
                "Everything in Elite",
                "Covers up to 4 family members",
            ],
            SubscriptionTier::Corporate => &[
                "Team wellness dashboard",
                "Volume session pricing",
            ],
        }
    }
}

/// A plan as shown on the subscriptions page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub tier: SubscriptionTier,
    pub name: String,
    #[ts(optional)]
    pub monthly_price: Option<Aed>,
    pub features: Vec<String>,
    pub is_current: bool,
}

impl PlanSummary {
    pub fn for_tier(tier: SubscriptionTier, current: SubscriptionTier) -> Self {
        PlanSummary {
            tier,
            name: tier.plan_name().to_string(),
            monthly_price: tier.monthly_price(),
            features: tier.features().iter().map(|f| f.to_string()).collect(),
            is_current: tier == current,
        }
    }
}

/// A redemption option annotated with what the user can afford.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOption {
    pub kind: RedemptionKind,
    pub title: String,
    pub description: String,
    pub value: String,
    pub cost: Points,
    pub fine_print: String,
    pub featured: bool,
    pub affordable: bool,
    pub shortfall: Points,
}

impl RedemptionOption {
    pub fn for_balance(kind: RedemptionKind, balance: Points) -> Self {
        RedemptionOption {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            value: kind.value_label().to_string(),
            cost: kind.cost(),
            fine_print: kind.fine_print().to_string(),
            featured: kind.is_featured(),
            affordable: balance >= kind.cost(),
            shortfall: kind.shortfall(balance),
        }
    }
}
