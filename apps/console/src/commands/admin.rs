//! # Admin Commands

use tracing::debug;
use valeo_core::DashboardSummary;

use crate::state::StoreState;

/// Headline KPIs for the admin dashboard.
pub fn get_dashboard(store: &StoreState) -> DashboardSummary {
    debug!("get_dashboard command");
    DashboardSummary::from_state(store.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::referral::simulate_conversion;
    use crate::commands::test_support::store;
    use valeo_core::Points;

    #[test]
    fn test_dashboard_tracks_store() {
        let mut store = store();
        let before = get_dashboard(&store);
        assert_eq!(before.conversion_rate_percent, 50);

        simulate_conversion(&mut store).unwrap();
        let after = get_dashboard(&store);

        assert_eq!(after.successful_referrals, 3);
        assert_eq!(after.conversion_rate_percent, 75);
        assert_eq!(after.points_outstanding, Points::new(1700));
        assert_eq!(after.referral_credits, Points::new(1000));
    }
}
