//! # Internal Referral Commands
//!
//! Staff-facing page: a clinician scans the patient's referral QR code at the
//! front desk, which records the referral straight away.

use tracing::{debug, info};
use valeo_core::Action;

use super::referral::{get_referrals, ReferralsView};
use super::CommandResponse;
use crate::error::ApiError;
use crate::feedback::Feedback;
use crate::state::StoreState;

/// Records a referral from a scanned QR code.
pub fn scan_referral_qr(
    store: &mut StoreState,
) -> Result<CommandResponse<ReferralsView>, ApiError> {
    debug!("scan_referral_qr command");
    store.dispatch(Action::AddReferral)?;
    info!(invites = store.state().stats.invites_sent, "QR referral recorded");

    Ok(CommandResponse::new(get_referrals(store))
        .with(Feedback::celebration())
        .with(Feedback::success(
            "QR Code scanned! Referral recorded successfully",
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{store, today};
    use valeo_core::ReferralStatus;

    #[test]
    fn test_scan_records_pending_referral() {
        let mut store = store();
        let response = scan_referral_qr(&mut store).unwrap();

        let newest = response.data.referrals.last().unwrap();
        assert_eq!(newest.id, 5);
        assert_eq!(newest.status, ReferralStatus::Pending);
        assert_eq!(newest.date, today());
        assert_eq!(response.data.invites_sent, 5);
        assert_eq!(response.feedback.len(), 2);
    }
}
