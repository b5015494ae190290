//! # Subscription Commands
//!
//! Plan cards and plan switching. There is no billing; switching simply
//! records the new tier.

use serde::Serialize;
use tracing::{debug, info};
use valeo_core::{Action, PlanSummary, SubscriptionTier};

use super::CommandResponse;
use crate::error::ApiError;
use crate::feedback::Feedback;
use crate::state::StoreState;

/// The subscriptions page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansView {
    pub current: SubscriptionTier,
    pub plans: Vec<PlanSummary>,
}

/// Lists every plan, marking the current one.
pub fn get_plans(store: &StoreState) -> PlansView {
    debug!("get_plans command");
    let current = store.state().user.subscription;
    PlansView {
        current,
        plans: SubscriptionTier::ALL
            .iter()
            .map(|tier| PlanSummary::for_tier(*tier, current))
            .collect(),
    }
}

/// Switches the user to `tier`. Re-selecting the current tier is allowed.
pub fn subscribe(
    store: &mut StoreState,
    tier: SubscriptionTier,
) -> Result<CommandResponse<PlansView>, ApiError> {
    debug!(%tier, "subscribe command");

    let previous = store.state().user.subscription;
    store.dispatch(Action::Subscribe { tier })?;
    info!(from = %previous, to = %tier, "Subscription changed");

    let message = if tier.is_paid() {
        format!("You are now subscribed to the {}!", tier.plan_name())
    } else {
        format!("Switched to {}", tier.plan_name())
    };

    Ok(CommandResponse::new(get_plans(store)).with(Feedback::success(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::store;

    #[test]
    fn test_get_plans_marks_current() {
        let view = get_plans(&store());
        assert_eq!(view.current, SubscriptionTier::Free);
        assert_eq!(view.plans.len(), SubscriptionTier::ALL.len());
        let current: Vec<_> = view.plans.iter().filter(|p| p.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].tier, SubscriptionTier::Free);
    }

    #[test]
    fn test_subscribe_premium_then_back() {
        let mut store = store();

        let response = subscribe(&mut store, SubscriptionTier::Premium).unwrap();
        assert_eq!(response.data.current, SubscriptionTier::Premium);
        assert_eq!(
            response.feedback,
            vec![Feedback::success("You are now subscribed to the Premium Plan!")]
        );

        let response = subscribe(&mut store, SubscriptionTier::Free).unwrap();
        assert_eq!(store.state().user.subscription, SubscriptionTier::Free);
        assert_eq!(
            response.feedback,
            vec![Feedback::success("Switched to Explorer Plan")]
        );
    }
}
