//! Subscription status resolution.
//!
//! Derives a tenant's billing state (trial/active/expired) and write
//! permission from stored timestamps and the current clock reading. Pure and
//! side-effect free; the write gate in `guard` owns the enforcement.

use crate::models::BillingProfile;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Length of the free trial, counted from profile creation.
pub const TRIAL_DURATION_DAYS: i64 = 7;

/// Current billing status of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

/// Resolved subscription state for one tenant at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionInfo {
    pub status: SubscriptionStatus,
    pub trial_days_remaining: i64,
    pub is_trial_expired: bool,
    pub can_write: bool,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

/// Resolve the billing state of a tenant.
///
/// An active paid plan always wins, even when the trial window has
/// separately elapsed. A missing profile or an uninitialized
/// `trial_started_at` resolves to expired: denial is the safe default when
/// the state cannot be established.
pub fn resolve_subscription(profile: Option<&BillingProfile>, now: DateTime<Utc>) -> SubscriptionInfo {
    let Some(profile) = profile else {
        return denied(None);
    };

    if profile.has_active_paid_plan() {
        let covered = match profile.subscription_ends_at {
            Some(ends_at) => ends_at > now,
            None => true,
        };
        if covered {
            return SubscriptionInfo {
                status: SubscriptionStatus::Active,
                trial_days_remaining: 0,
                is_trial_expired: false,
                can_write: true,
                trial_ends_at: None,
            };
        }
    }

    let Some(trial_started_at) = profile.trial_started_at else {
        return denied(None);
    };

    let trial_ends_at = trial_started_at + Duration::days(TRIAL_DURATION_DAYS);
    if now < trial_ends_at {
        SubscriptionInfo {
            status: SubscriptionStatus::Trial,
            trial_days_remaining: days_remaining(trial_ends_at, now),
            is_trial_expired: false,
            can_write: true,
            trial_ends_at: Some(trial_ends_at),
        }
    } else {
        denied(Some(trial_ends_at))
    }
}

fn denied(trial_ends_at: Option<DateTime<Utc>>) -> SubscriptionInfo {
    SubscriptionInfo {
        status: SubscriptionStatus::Expired,
        trial_days_remaining: 0,
        is_trial_expired: true,
        can_write: false,
        trial_ends_at,
    }
}

/// Whole days left in the trial, rounded up and clamped to zero.
fn days_remaining(trial_ends_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (trial_ends_at - now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + 86_399) / 86_400
}
