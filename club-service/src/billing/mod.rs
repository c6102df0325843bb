//! Billing logic for club-service.
//!
//! Two pure calculation modules (document totals, subscription resolution)
//! plus the write gate that every mutating handler runs through. Both cores
//! receive their inputs as explicit arguments and never read ambient state.

mod guard;
mod subscription;
mod totals;

pub use guard::{evaluate_write_access, require_write_access};
pub use subscription::{
    resolve_subscription, SubscriptionInfo, SubscriptionStatus, TRIAL_DURATION_DAYS,
};
pub use totals::{compute_ht, compute_ttc, compute_vat, format_amount, DocumentTotals};
