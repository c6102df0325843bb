//! Billing profile model for club-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-tenant billing profile. One row per tenant; `trial_started_at` is set
/// when the profile is created and never rewritten through the API.
///
/// `trial_started_at` stays nullable for rows migrated from before trial
/// tracking existed; the resolver treats such a profile as expired.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BillingProfile {
    pub tenant_id: Uuid,
    pub club_name: String,
    pub plan: String,
    pub trial_started_at: Option<DateTime<Utc>>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

impl BillingProfile {
    /// Whether the payment processor has confirmed a paid plan for this
    /// tenant. The expiry of that plan is judged by the resolver, not here.
    pub fn has_active_paid_plan(&self) -> bool {
        self.plan == "pro"
    }
}
