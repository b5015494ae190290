//! # State Store
//!
//! The single source of truth and the pure reducer over it.
//!
//! ## Reducer Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   &AppState ──┐                                                         │
//! │               ├──► reduce() ──► Ok(Transition { state, outcome })       │
//! │   Action ─────┤                  │                                      │
//! │   today ──────┘                  └► Err(InsufficientBalance)            │
//! │                                                                         │
//! │  • The input state is never mutated; the next state is built whole     │
//! │    and only then handed back                                            │
//! │  • Outcome::Unchanged means "nothing to do" (unknown or already        │
//! │    converted referral); it is not an error                              │
//! │  • The only rejection is redeeming more points than the balance        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use valeo_core::catalog::RedemptionKind;
//! use valeo_core::points::Points;
//! use valeo_core::store::{reduce, Action, AppState};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
//! let state = AppState::seeded();
//!
//! let next = reduce(
//!     &state,
//!     &Action::RedeemPoints { amount: Points::new(1000), kind: RedemptionKind::Credit },
//!     today,
//! )
//! .unwrap()
//! .state;
//!
//! assert_eq!(next.user.points, Points::new(200));
//! assert_eq!(state.user.points, Points::new(1200));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::RedemptionKind;
use crate::error::{CoreError, CoreResult};
use crate::points::{Aed, Points};
use crate::types::{
    Referral, ReferralStatus, RewardRules, Stats, SubscriptionTier, Transaction,
    TransactionStatus, TransactionType, User,
};

// =============================================================================
// App State
// =============================================================================

/// Everything the views read.
///
/// `transactions` is ordered most recent first; `referrals` in creation
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: User,
    pub referrals: Vec<Referral>,
    pub transactions: Vec<Transaction>,
    pub stats: Stats,
    pub rules: RewardRules,
}

impl AppState {
    /// Creates an empty store for a user.
    pub fn new(user: User, rules: RewardRules) -> Self {
        AppState {
            user,
            referrals: Vec::new(),
            transactions: Vec::new(),
            stats: Stats::default(),
            rules,
        }
    }

    pub fn find_referral(&self, id: u32) -> Option<&Referral> {
        self.referrals.iter().find(|r| r.id == id)
    }

    /// The oldest referral still waiting to convert.
    pub fn first_pending_referral(&self) -> Option<&Referral> {
        self.referrals.iter().find(|r| r.status.is_pending())
    }

    pub fn pending_referrals(&self) -> usize {
        self.referrals.iter().filter(|r| r.status.is_pending()).count()
    }

    fn next_referral_id(&self) -> u32 {
        self.referrals.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn next_transaction_id(&self) -> u32 {
        self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Prepends a ledger entry. Does not touch the balance.
    fn push_entry(
        &mut self,
        description: String,
        points: i64,
        kind: TransactionType,
        today: NaiveDate,
    ) {
        let entry = Transaction {
            id: self.next_transaction_id(),
            description,
            points,
            date: today,
            kind: Some(kind),
            status: Some(TransactionStatus::Completed),
        };
        self.transactions.insert(0, entry);
    }

    /// Credits the balance, bumps `total_earned` and records the entry.
    fn credit(
        &mut self,
        amount: Points,
        description: String,
        kind: TransactionType,
        today: NaiveDate,
    ) {
        self.user.points += amount;
        self.user.total_earned += amount;
        self.push_entry(description, amount.as_credit(), kind, today);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Records a new Pending invite dated `today`. Always succeeds.
    pub fn add_referral(&self, today: NaiveDate) -> AppState {
        let mut next = self.clone();
        next.referrals.push(Referral {
            id: self.next_referral_id(),
            status: ReferralStatus::Pending,
            date: today,
        });
        next.stats.invites_sent += 1;
        next
    }

    /// Converts a Pending referral and credits the referral reward.
    ///
    /// ## Behavior
    /// - Unknown id: `Unchanged(ReferralNotFound)`
    /// - Already converted: `Unchanged(AlreadyConverted)`
    /// - Pending: status flips, reward credited, stats bumped
    pub fn convert_referral(&self, id: u32, today: NaiveDate) -> Transition {
        match self.find_referral(id) {
            None => return Transition::unchanged(self, NoOpReason::ReferralNotFound),
            Some(r) if !r.status.is_pending() => {
                return Transition::unchanged(self, NoOpReason::AlreadyConverted)
            }
            Some(_) => {}
        }

        let reward = self.rules.referral_reward;
        let mut next = self.clone();
        for referral in next.referrals.iter_mut().filter(|r| r.id == id) {
            referral.status = ReferralStatus::Converted;
        }
        next.credit(
            reward,
            "Referral Conversion".to_string(),
            TransactionType::Earning,
            today,
        );
        next.stats.successful_referrals += 1;
        next.stats.referral_credits += reward;

        Transition::applied(next)
    }

    /// Overwrites the subscription tier. No transition rules, no payment.
    pub fn subscribe(&self, tier: SubscriptionTier) -> AppState {
        let mut next = self.clone();
        next.user.subscription = tier;
        next
    }

    /// Spends `amount` points on a reward.
    ///
    /// ## Errors
    /// `InsufficientBalance` when `amount` exceeds the balance; `self` is
    /// left as it was.
    pub fn redeem_points(
        &self,
        amount: Points,
        kind: RedemptionKind,
        today: NaiveDate,
    ) -> CoreResult<AppState> {
        let remaining =
            self.user
                .points
                .checked_sub(amount)
                .ok_or(CoreError::InsufficientBalance {
                    required: amount,
                    available: self.user.points,
                })?;

        let mut next = self.clone();
        next.user.points = remaining;
        next.user.total_redeemed += amount;
        next.push_entry(
            kind.ledger_description(amount, self.rules.points_per_aed_credit),
            amount.as_debit(),
            TransactionType::Redemption,
            today,
        );
        Ok(next)
    }

    /// Credits an arbitrary amount with a caller-supplied description.
    pub fn add_points(
        &self,
        amount: Points,
        description: &str,
        kind: TransactionType,
        today: NaiveDate,
    ) -> AppState {
        let mut next = self.clone();
        next.credit(amount, description.trim().to_string(), kind, today);
        next
    }

    /// Credits points for money spent on sessions or orders.
    ///
    /// Spend below one point's worth still counts toward `total_spent` but
    /// writes no ledger entry.
    pub fn record_purchase(&self, amount: Aed, description: &str, today: NaiveDate) -> AppState {
        let earned = amount.to_points(self.rules.points_per_aed);
        let mut next = self.clone();
        if !earned.is_zero() {
            next.credit(
                earned,
                format!("Purchase: {}", description.trim()),
                TransactionType::Earning,
                today,
            );
        }
        next.stats.total_spent += amount;
        next
    }

    /// Credits a challenge bonus.
    pub fn complete_challenge(&self, name: &str, amount: Points, today: NaiveDate) -> AppState {
        let mut next = self.clone();
        next.credit(
            amount,
            format!("Challenge Completed: {}", name.trim()),
            TransactionType::Bonus,
            today,
        );
        next.stats.challenges_completed += 1;
        next
    }

    /// Credits the review reward.
    pub fn submit_review(&self, today: NaiveDate) -> AppState {
        let mut next = self.clone();
        next.credit(
            self.rules.review_reward,
            "Review Submitted".to_string(),
            TransactionType::Earning,
            today,
        );
        next
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A mutation request, as dispatched by the views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    AddReferral,
    ConvertReferral {
        id: u32,
    },
    Subscribe {
        tier: SubscriptionTier,
    },
    RedeemPoints {
        amount: Points,
        kind: RedemptionKind,
    },
    AddPoints {
        amount: Points,
        description: String,
        kind: TransactionType,
    },
    RecordPurchase {
        amount: Aed,
        description: String,
    },
    CompleteChallenge {
        name: String,
        amount: Points,
    },
    SubmitReview,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddReferral => "add_referral",
            Action::ConvertReferral { .. } => "convert_referral",
            Action::Subscribe { .. } => "subscribe",
            Action::RedeemPoints { .. } => "redeem_points",
            Action::AddPoints { .. } => "add_points",
            Action::RecordPurchase { .. } => "record_purchase",
            Action::CompleteChallenge { .. } => "complete_challenge",
            Action::SubmitReview => "submit_review",
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Why a dispatch left the state as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum NoOpReason {
    ReferralNotFound,
    AlreadyConverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "reason", rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    Unchanged(NoOpReason),
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    pub outcome: Outcome,
}

impl Transition {
    fn applied(state: AppState) -> Self {
        Transition {
            state,
            outcome: Outcome::Applied,
        }
    }

    fn unchanged(state: &AppState, reason: NoOpReason) -> Self {
        Transition {
            state: state.clone(),
            outcome: Outcome::Unchanged(reason),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, Outcome::Applied)
    }
}

/// Applies `action` to `state`, stamping new records with `today`.
pub fn reduce(state: &AppState, action: &Action, today: NaiveDate) -> CoreResult<Transition> {
    let next = match action {
        Action::AddReferral => state.add_referral(today),
        Action::ConvertReferral { id } => return Ok(state.convert_referral(*id, today)),
        Action::Subscribe { tier } => state.subscribe(*tier),
        Action::RedeemPoints { amount, kind } => state.redeem_points(*amount, *kind, today)?,
        Action::AddPoints {
            amount,
            description,
            kind,
        } => state.add_points(*amount, description, *kind, today),
        Action::RecordPurchase {
            amount,
            description,
        } => state.record_purchase(*amount, description, today),
        Action::CompleteChallenge { name, amount } => {
            state.complete_challenge(name, *amount, today)
        }
        Action::SubmitReview => state.submit_review(today),
    };
    Ok(Transition::applied(next))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
    }

    #[test]
    fn test_add_referral() {
        let state = AppState::seeded();
        let next = state.add_referral(today());

        assert_eq!(next.referrals.len(), state.referrals.len() + 1);
        assert_eq!(next.stats.invites_sent, state.stats.invites_sent + 1);

        let added = next.referrals.last().unwrap();
        assert_eq!(added.id, 5);
        assert_eq!(added.status, ReferralStatus::Pending);
        assert_eq!(added.date, today());
    }

    #[test]
    fn test_convert_pending_referral() {
        let state = AppState::seeded();
        let t = state.convert_referral(1, today());

        assert!(t.is_applied());
        let next = t.state;
        assert_eq!(next.find_referral(1).unwrap().status, ReferralStatus::Converted);
        assert_eq!(next.user.points, Points::new(1700));
        assert_eq!(next.user.total_earned, Points::new(1700));
        assert_eq!(next.stats.successful_referrals, 3);
        assert_eq!(next.stats.referral_credits, Points::new(1000));

        let entry = &next.transactions[0];
        assert_eq!(entry.id, 4);
        assert_eq!(entry.description, "Referral Conversion");
        assert_eq!(entry.points, 500);
        assert_eq!(entry.kind, Some(TransactionType::Earning));
    }

    #[test]
    fn test_convert_is_silent_noop() {
        let state = AppState::seeded();

        let t = state.convert_referral(2, today());
        assert_eq!(t.outcome, Outcome::Unchanged(NoOpReason::AlreadyConverted));
        assert_eq!(t.state, state);

        let t = state.convert_referral(99, today());
        assert_eq!(t.outcome, Outcome::Unchanged(NoOpReason::ReferralNotFound));
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_subscribe_overwrites() {
        let state = AppState::seeded();
        let next = state.subscribe(SubscriptionTier::Corporate);
        assert_eq!(next.user.subscription, SubscriptionTier::Corporate);

        // Downgrades are not policed
        let back = next.subscribe(SubscriptionTier::Free);
        assert_eq!(back.user.subscription, SubscriptionTier::Free);
    }

    #[test]
    fn test_redeem_exact_balance() {
        let state = AppState::seeded();
        let next = state
            .redeem_points(Points::new(1200), RedemptionKind::Credit, today())
            .unwrap();
        assert!(next.user.points.is_zero());
        assert_eq!(next.user.total_redeemed, Points::new(1200));
        assert_eq!(next.transactions[0].description, "Redeemed for 120 AED Account Credit");
    }

    #[test]
    fn test_redeem_rejected_reports_amounts() {
        let state = AppState::seeded();
        let err = state
            .redeem_points(Points::new(5000), RedemptionKind::Session, today())
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientBalance {
                required: Points::new(5000),
                available: Points::new(1200),
            }
        );
    }

    #[test]
    fn test_add_points() {
        let state = AppState::seeded();
        let next = state.add_points(Points::new(250), " Yoga class ", TransactionType::Bonus, today());
        assert_eq!(next.user.points, Points::new(1450));
        assert_eq!(next.user.total_earned, Points::new(1450));
        assert_eq!(next.transactions[0].description, "Yoga class");
        assert_eq!(next.transactions[0].kind, Some(TransactionType::Bonus));
    }

    #[test]
    fn test_record_purchase() {
        let state = AppState::seeded();
        let next = state.record_purchase(Aed::from_major_minor(49, 95), "IV Therapy", today());

        // AED 49.95 × 10 = 499.5 → 499
        assert_eq!(next.user.points, Points::new(1699));
        assert_eq!(next.stats.total_spent, Aed::from_fils(4995));
        assert_eq!(next.transactions[0].description, "Purchase: IV Therapy");
        assert_eq!(next.transactions[0].points, 499);
    }

    #[test]
    fn test_record_purchase_below_one_point_writes_no_entry() {
        let state = AppState::seeded();
        let next = state.record_purchase(Aed::from_fils(9), "Gum", today());

        assert_eq!(next.user.points, state.user.points);
        assert_eq!(next.user.total_earned, state.user.total_earned);
        assert_eq!(next.transactions, state.transactions);
        assert_eq!(next.stats.total_spent, Aed::from_fils(9));
    }

    #[test]
    fn test_complete_challenge() {
        let state = AppState::seeded();
        let next = state.complete_challenge("30-Day Consistency", Points::new(1000), today());
        assert_eq!(next.user.points, Points::new(2200));
        assert_eq!(next.stats.challenges_completed, 1);
        assert_eq!(
            next.transactions[0].description,
            "Challenge Completed: 30-Day Consistency"
        );
        assert_eq!(next.transactions[0].kind, Some(TransactionType::Bonus));
    }

    #[test]
    fn test_submit_review() {
        let state = AppState::seeded();
        let next = state.submit_review(today());
        assert_eq!(next.user.points, Points::new(1700));
        assert_eq!(next.transactions[0].description, "Review Submitted");
    }

    #[test]
    fn test_custom_rules_flow_through() {
        let mut state = AppState::seeded();
        state.rules.referral_reward = Points::new(1000);
        state.rules.points_per_aed = 5;

        let next = state.convert_referral(3, today()).state;
        assert_eq!(next.user.points, Points::new(2200));

        let next = next.record_purchase(Aed::from_dirhams(10), "Supplements", today());
        assert_eq!(next.user.points, Points::new(2250));
    }

    #[test]
    fn test_reduce_dispatches() {
        let state = AppState::seeded();
        let t = reduce(&state, &Action::SubmitReview, today()).unwrap();
        assert!(t.is_applied());
        assert_eq!(t.state, state.submit_review(today()));

        let t = reduce(&state, &Action::ConvertReferral { id: 4 }, today()).unwrap();
        assert!(!t.is_applied());
    }

    #[test]
    fn test_action_wire_format() {
        let action = Action::RedeemPoints {
            amount: Points::new(1000),
            kind: RedemptionKind::Credit,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "redeemPoints");
        assert_eq!(json["amount"], 1000);
        assert_eq!(json["kind"], "credit");

        let parsed: Action = serde_json::from_str(r#"{"action":"addReferral"}"#).unwrap();
        assert_eq!(parsed, Action::AddReferral);
    }
}
