//! # Wallet Commands
//!
//! Balance, loyalty tier, the points ledger, and every way points move.
//!
//! ## Points Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Wallet                                               │
//! │                                                                         │
//! │   EARN                                   SPEND                          │
//! │   ────                                   ─────                          │
//! │   record_purchase  (AED × rate) ──┐                                     │
//! │   complete_challenge (bonus) ─────┤     ┌──► redeem credit   1,000 VWP  │
//! │   submit_review   (+500) ─────────┼──► balance ──► redeem session 5,000 │
//! │   add_points      (manual) ───────┤     └──► redeem retreat 10,000 VWP  │
//! │   referral conversions ───────────┘                                     │
//! │                                                                         │
//! │   Every movement is a ledger entry, newest first.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use valeo_core::validation::{
    validate_description, validate_earn_amount, validate_purchase_amount,
    validate_redeem_amount,
};
use valeo_core::{
    Action, Aed, AppState, Points, RedemptionKind, RedemptionOption, TierProgress, Transaction,
    TransactionType,
};

use super::CommandResponse;
use crate::error::ApiError;
use crate::feedback::{group_thousands, Feedback};
use crate::state::StoreState;

/// The wallet page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub balance: Points,
    /// What the balance would buy as account credit.
    pub balance_value: Aed,
    pub total_earned: Points,
    pub total_redeemed: Points,
    pub tier: TierProgress,
    pub redemption_options: Vec<RedemptionOption>,
    pub transactions: Vec<Transaction>,
}

impl From<&AppState> for WalletView {
    fn from(state: &AppState) -> Self {
        let balance = state.user.points;
        WalletView {
            balance,
            balance_value: balance.to_aed(state.rules.points_per_aed_credit),
            total_earned: state.user.total_earned,
            total_redeemed: state.user.total_redeemed,
            tier: TierProgress::for_points(balance),
            redemption_options: RedemptionKind::ALL
                .iter()
                .map(|kind| RedemptionOption::for_balance(*kind, balance))
                .collect(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Gets the wallet page.
pub fn get_wallet(store: &StoreState) -> WalletView {
    debug!("get_wallet command");
    WalletView::from(store.state())
}

/// Redeems a catalog reward at its listed cost.
///
/// ## Errors
/// `INSUFFICIENT_BALANCE` naming the shortfall; the store is unchanged.
pub fn redeem(
    store: &mut StoreState,
    kind: RedemptionKind,
) -> Result<CommandResponse<WalletView>, ApiError> {
    debug!(%kind, "redeem command");

    let amount = kind.cost();
    validate_redeem_amount(amount)?;
    store.dispatch(Action::RedeemPoints { amount, kind })?;

    info!(%kind, cost = amount.value(), "Reward redeemed");
    Ok(CommandResponse::new(get_wallet(store))
        .with(Feedback::big_celebration())
        .with(Feedback::success(format!(
            "Success! {} VWP redeemed for {}!",
            group_thousands(amount.value()),
            kind.title()
        ))))
}

/// Credits points with a caller-supplied description.
pub fn add_points(
    store: &mut StoreState,
    amount: Points,
    description: &str,
    kind: TransactionType,
) -> Result<CommandResponse<WalletView>, ApiError> {
    debug!(amount = amount.value(), "add_points command");

    validate_earn_amount(amount)?;
    validate_description("description", description)?;

    store.dispatch(Action::AddPoints {
        amount,
        description: description.to_string(),
        kind,
    })?;

    Ok(CommandResponse::new(get_wallet(store)).with(Feedback::success(format!(
        "+{} VWP added",
        group_thousands(amount.value())
    ))))
}

/// Records money spent and credits the points it earns.
pub fn record_purchase(
    store: &mut StoreState,
    amount: Aed,
    description: &str,
) -> Result<CommandResponse<WalletView>, ApiError> {
    debug!(%amount, "record_purchase command");

    validate_purchase_amount(amount)?;
    validate_description("description", description)?;

    let earned = amount.to_points(store.state().rules.points_per_aed);
    store.dispatch(Action::RecordPurchase {
        amount,
        description: description.to_string(),
    })?;

    let message = if earned.is_zero() {
        format!("{} recorded", amount)
    } else {
        format!(
            "{} recorded. +{} VWP earned",
            amount,
            group_thousands(earned.value())
        )
    };
    Ok(CommandResponse::new(get_wallet(store)).with(Feedback::success(message)))
}

/// Credits a completed wellness challenge.
pub fn complete_challenge(
    store: &mut StoreState,
    name: &str,
    amount: Points,
) -> Result<CommandResponse<WalletView>, ApiError> {
    debug!(name, amount = amount.value(), "complete_challenge command");

    validate_description("name", name)?;
    validate_earn_amount(amount)?;

    store.dispatch(Action::CompleteChallenge {
        name: name.to_string(),
        amount,
    })?;

    Ok(CommandResponse::new(get_wallet(store))
        .with(Feedback::success(format!(
            "Challenge completed! +{} VWP",
            group_thousands(amount.value())
        )))
        .with(Feedback::small_celebration()))
}

/// Credits the review reward.
pub fn submit_review(store: &mut StoreState) -> Result<CommandResponse<WalletView>, ApiError> {
    debug!("submit_review command");

    let reward = store.state().rules.review_reward;
    store.dispatch(Action::SubmitReview)?;

    Ok(CommandResponse::new(get_wallet(store)).with(Feedback::success(format!(
        "Thanks for your review! +{} VWP",
        group_thousands(reward.value())
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::store;
    use crate::error::ErrorCode;
    use valeo_core::LoyaltyTier;

    #[test]
    fn test_get_wallet_from_seed() {
        let view = get_wallet(&store());
        assert_eq!(view.balance, Points::new(1200));
        assert_eq!(view.balance_value, Aed::from_dirhams(120));
        assert_eq!(view.tier.tier, LoyaltyTier::Advocate);
        assert_eq!(view.redemption_options.len(), 3);
        assert!(view.redemption_options[0].affordable);
        assert!(!view.redemption_options[1].affordable);
        assert_eq!(view.redemption_options[1].shortfall, Points::new(3800));
        assert_eq!(view.transactions.len(), 3);
    }

    #[test]
    fn test_redeem_credit() {
        let mut store = store();
        let response = redeem(&mut store, RedemptionKind::Credit).unwrap();

        assert_eq!(response.data.balance, Points::new(200));
        assert_eq!(response.data.transactions[0].points, -1000);
        assert_eq!(
            response.data.transactions[0].description,
            "Redeemed for 100 AED Account Credit"
        );
        assert_eq!(response.feedback[0], Feedback::big_celebration());
        assert_eq!(
            response.feedback[1],
            Feedback::success("Success! 1,000 VWP redeemed for Account Credit!")
        );
    }

    #[test]
    fn test_redeem_session_insufficient() {
        let mut store = store();
        let before = store.state().clone();

        let err = redeem(&mut store, RedemptionKind::Session).unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientBalance);
        assert_eq!(err.message, "You need 3800 more VWP to redeem this reward");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_record_purchase() {
        let mut store = store();
        let response = record_purchase(&mut store, Aed::from_dirhams(50), "Yoga class").unwrap();

        assert_eq!(response.data.balance, Points::new(1700));
        assert_eq!(response.data.transactions[0].description, "Purchase: Yoga class");
        assert_eq!(store.state().stats.total_spent, Aed::from_dirhams(50));
        assert_eq!(
            response.feedback[0],
            Feedback::success("AED 50 recorded. +500 VWP earned")
        );
    }

    #[test]
    fn test_record_purchase_too_small_to_earn() {
        let mut store = store();
        let response = record_purchase(&mut store, Aed::from_fils(5), "Gum").unwrap();

        assert_eq!(response.data.balance, Points::new(1200));
        assert_eq!(response.data.transactions.len(), 3);
        assert_eq!(response.feedback, vec![Feedback::success("AED 0.05 recorded")]);
    }

    #[test]
    fn test_get_wallet_lists_fine_print() {
        let view = get_wallet(&store());
        assert_eq!(view.redemption_options[0].fine_print, "Credit never expires");
        assert_eq!(
            view.redemption_options[2].fine_print,
            "Includes accommodation and meals"
        );
    }

    #[test]
    fn test_record_purchase_validates_first() {
        let mut store = store();
        let err = record_purchase(&mut store, Aed::zero(), "Yoga class").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = record_purchase(&mut store, Aed::from_dirhams(10), "  ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.state().stats.total_spent == Aed::zero());
    }

    #[test]
    fn test_complete_challenge() {
        let mut store = store();
        let response = complete_challenge(&mut store, "Hydration", Points::new(300)).unwrap();
        assert_eq!(response.data.balance, Points::new(1500));
        assert_eq!(store.state().stats.challenges_completed, 1);
        assert_eq!(
            response.data.transactions[0].kind,
            Some(TransactionType::Bonus)
        );
    }

    #[test]
    fn test_add_points_rejects_zero() {
        let mut store = store();
        let err = add_points(&mut store, Points::zero(), "Adjustment", TransactionType::Bonus)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_submit_review() {
        let mut store = store();
        let response = submit_review(&mut store).unwrap();
        assert_eq!(response.data.balance, Points::new(1700));
        assert_eq!(response.data.transactions[0].description, "Review Submitted");
    }
}
