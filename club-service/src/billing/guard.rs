//! Subscription write gate.

use crate::billing::subscription::{resolve_subscription, SubscriptionInfo};
use crate::models::BillingProfile;
use crate::services::metrics::record_write_denied;
use crate::services::Database;
use chrono::{DateTime, Utc};
use club_core::error::AppError;
use tracing::warn;
use uuid::Uuid;

/// Check that the tenant may perform a mutation. Invoked at the top of every
/// mutating handler, before any write begins.
pub async fn require_write_access(
    db: &Database,
    tenant_id: Uuid,
) -> Result<SubscriptionInfo, AppError> {
    let fetched = db.get_billing_profile(tenant_id).await;
    evaluate_write_access(tenant_id, fetched, Utc::now())
}

/// Turn a profile lookup outcome into a gate decision.
///
/// A failure while loading the billing profile resolves to the same deny
/// outcome as an expired trial: the gate absorbs the error and denies, it
/// never allows implicitly. Split from the database call so callers and
/// tests can drive the error branch directly.
pub fn evaluate_write_access(
    tenant_id: Uuid,
    fetched: Result<Option<BillingProfile>, AppError>,
    now: DateTime<Utc>,
) -> Result<SubscriptionInfo, AppError> {
    let (profile, fetch_failed) = match fetched {
        Ok(profile) => (profile, false),
        Err(e) => {
            warn!(tenant_id = %tenant_id, error = %e, "Billing profile unavailable, denying write");
            (None, true)
        }
    };

    let info = resolve_subscription(profile.as_ref(), now);
    if info.can_write {
        return Ok(info);
    }

    let reason = if fetch_failed {
        "profile_unavailable"
    } else {
        info.status.as_str()
    };
    record_write_denied(&tenant_id.to_string(), reason);

    // trial_ends_at is only set when a trial actually ran and lapsed.
    let message = if info.trial_ends_at.is_some() {
        "Your trial has ended. Upgrade to the Pro plan from the billing page to keep editing your club data."
    } else {
        "Your club has no active subscription. Upgrade to the Pro plan from the billing page to edit your club data."
    };
    Err(AppError::WriteDenied {
        code: "write_denied",
        message: message.to_string(),
    })
}
