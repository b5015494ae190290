//! # Referral Commands
//!
//! The referral hub: invite friends, share the link, watch referrals convert.
//!
//! ## Referral Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Referral Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐   invite_friend    ┌──────────┐   convert_referral        │
//! │  │ (friend) │──────────────────►│ Pending  │──────────────────┐        │
//! │  └──────────┘   scan_referral_qr └──────────┘  simulate_       │        │
//! │                                                conversion      ▼        │
//! │                                                         ┌───────────┐   │
//! │                                                         │ Converted │   │
//! │                                                         │ +500 VWP  │   │
//! │                                                         └───────────┘   │
//! │  Converted never goes back to Pending.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use valeo_core::{Action, AppState, Outcome, Points, Referral, ReferralMilestone};

use super::CommandResponse;
use crate::error::ApiError;
use crate::feedback::Feedback;
use crate::state::StoreState;

/// Personal invite link shown on the referral page.
pub const REFERRAL_LINK: &str = "valeo.app/invite/abc123";

/// The referral page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralsView {
    pub referrals: Vec<Referral>,
    pub invites_sent: u32,
    pub successful_referrals: u32,
    pub pending_referrals: u32,
    pub referral_credits: Points,
    pub reward_per_referral: Points,
    pub milestone: ReferralMilestone,
    pub invite_link: String,
}

impl From<&AppState> for ReferralsView {
    fn from(state: &AppState) -> Self {
        ReferralsView {
            referrals: state.referrals.clone(),
            invites_sent: state.stats.invites_sent,
            successful_referrals: state.stats.successful_referrals,
            pending_referrals: state.pending_referrals() as u32,
            referral_credits: state.stats.referral_credits,
            reward_per_referral: state.rules.referral_reward,
            milestone: ReferralMilestone::for_successful(state.stats.successful_referrals),
            invite_link: REFERRAL_LINK.to_string(),
        }
    }
}

/// What gets copied or shared over WhatsApp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub link: String,
    pub message: String,
}

/// Gets the referral page.
pub fn get_referrals(store: &StoreState) -> ReferralsView {
    debug!("get_referrals command");
    ReferralsView::from(store.state())
}

/// Sends an invite; records a new Pending referral.
pub fn invite_friend(store: &mut StoreState) -> Result<CommandResponse<ReferralsView>, ApiError> {
    debug!("invite_friend command");
    store.dispatch(Action::AddReferral)?;
    Ok(CommandResponse::new(get_referrals(store)).with(Feedback::success("Invitation sent!")))
}

/// Copies the invite link.
pub fn share_link() -> CommandResponse<ShareLink> {
    debug!("share_link command");
    let share = ShareLink {
        link: REFERRAL_LINK.to_string(),
        message: format!(
            "I've been using Valeo Health for my wellness journey. Get 40% off your first session with my link: {}",
            REFERRAL_LINK
        ),
    };
    CommandResponse::new(share).with(Feedback::success("Link copied to clipboard!"))
}

/// Converts the oldest Pending referral, standing in for a friend signing up.
///
/// ## Errors
/// `NOT_FOUND` when every referral is already converted.
pub fn simulate_conversion(
    store: &mut StoreState,
) -> Result<CommandResponse<ReferralsView>, ApiError> {
    debug!("simulate_conversion command");

    let id = store
        .state()
        .first_pending_referral()
        .map(|r| r.id)
        .ok_or_else(|| ApiError::not_found("No pending referrals to convert"))?;

    convert_referral(store, id)
}

/// Converts a specific referral.
///
/// Unknown or already converted ids leave the store as it was and come back
/// with no feedback.
pub fn convert_referral(
    store: &mut StoreState,
    id: u32,
) -> Result<CommandResponse<ReferralsView>, ApiError> {
    debug!(id, "convert_referral command");

    let outcome = store.dispatch(Action::ConvertReferral { id })?;
    let response = CommandResponse::new(get_referrals(store));

    Ok(match outcome {
        Outcome::Applied => {
            let reward = store.state().rules.referral_reward.value();
            response
                .with(Feedback::success(format!(
                    "Referral converted! +{} points earned",
                    reward
                )))
                .with(Feedback::small_celebration())
        }
        Outcome::Unchanged(_) => response,
    })
}
