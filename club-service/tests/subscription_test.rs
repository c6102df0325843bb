//! Subscription status resolver tests.

use chrono::{DateTime, Duration, Utc};
use club_service::billing::{resolve_subscription, SubscriptionStatus, TRIAL_DURATION_DAYS};
use club_service::models::BillingProfile;
use uuid::Uuid;

fn profile(
    plan: &str,
    trial_started_at: Option<DateTime<Utc>>,
    subscription_ends_at: Option<DateTime<Utc>>,
) -> BillingProfile {
    BillingProfile {
        tenant_id: Uuid::new_v4(),
        club_name: "FC Test".to_string(),
        plan: plan.to_string(),
        trial_started_at,
        subscription_ends_at,
        created_utc: trial_started_at.unwrap_or_else(Utc::now),
    }
}

#[test]
fn fresh_trial_has_seven_days() {
    let start = Utc::now();
    let info = resolve_subscription(Some(&profile("free", Some(start), None)), start);

    assert_eq!(info.status, SubscriptionStatus::Trial);
    assert_eq!(info.trial_days_remaining, TRIAL_DURATION_DAYS);
    assert!(info.can_write);
    assert!(!info.is_trial_expired);
    assert_eq!(
        info.trial_ends_at,
        Some(start + Duration::days(TRIAL_DURATION_DAYS))
    );
}

#[test]
fn last_minute_of_trial_still_writes() {
    let start = Utc::now();
    let now = start + Duration::days(6) + Duration::hours(23) + Duration::minutes(59);
    let info = resolve_subscription(Some(&profile("free", Some(start), None)), now);

    assert_eq!(info.status, SubscriptionStatus::Trial);
    assert_eq!(info.trial_days_remaining, 1);
    assert!(info.can_write);
}

#[test]
fn trial_expires_at_the_boundary() {
    let start = Utc::now();
    let now = start + Duration::days(TRIAL_DURATION_DAYS);
    let info = resolve_subscription(Some(&profile("free", Some(start), None)), now);

    assert_eq!(info.status, SubscriptionStatus::Expired);
    assert_eq!(info.trial_days_remaining, 0);
    assert!(info.is_trial_expired);
    assert!(!info.can_write);
}

#[test]
fn expired_trial_blocks_writes() {
    let start = Utc::now();
    let now = start + Duration::days(TRIAL_DURATION_DAYS) + Duration::seconds(1);
    let info = resolve_subscription(Some(&profile("free", Some(start), None)), now);

    assert_eq!(info.status, SubscriptionStatus::Expired);
    assert!(!info.can_write);
}

#[test]
fn paid_plan_overrides_expired_trial() {
    let now = Utc::now();
    let start = now - Duration::days(30);
    let info = resolve_subscription(Some(&profile("pro", Some(start), None)), now);

    assert_eq!(info.status, SubscriptionStatus::Active);
    assert!(info.can_write);
    assert!(!info.is_trial_expired);
}

#[test]
fn paid_plan_with_future_end_date_is_active() {
    let now = Utc::now();
    let info = resolve_subscription(
        Some(&profile("pro", None, Some(now + Duration::days(300)))),
        now,
    );

    assert_eq!(info.status, SubscriptionStatus::Active);
    assert!(info.can_write);
}

#[test]
fn lapsed_paid_plan_falls_back_to_trial_window() {
    let now = Utc::now();
    let start = now - Duration::days(2);
    // Paid coverage ended yesterday, but the trial window is still open.
    let info = resolve_subscription(
        Some(&profile("pro", Some(start), Some(now - Duration::days(1)))),
        now,
    );

    assert_eq!(info.status, SubscriptionStatus::Trial);
    assert!(info.can_write);
}

#[test]
fn lapsed_paid_plan_with_spent_trial_is_expired() {
    let now = Utc::now();
    let start = now - Duration::days(30);
    let info = resolve_subscription(
        Some(&profile("pro", Some(start), Some(now - Duration::days(1)))),
        now,
    );

    assert_eq!(info.status, SubscriptionStatus::Expired);
    assert!(!info.can_write);
}

#[test]
fn missing_profile_is_denied() {
    let info = resolve_subscription(None, Utc::now());

    assert_eq!(info.status, SubscriptionStatus::Expired);
    assert!(!info.can_write);
    assert!(info.is_trial_expired);
    assert_eq!(info.trial_days_remaining, 0);
}

#[test]
fn uninitialized_trial_start_is_denied() {
    let info = resolve_subscription(Some(&profile("free", None, None)), Utc::now());

    assert_eq!(info.status, SubscriptionStatus::Expired);
    assert!(!info.can_write);
}

#[test]
fn days_remaining_rounds_up() {
    let start = Utc::now();
    // One second into the trial: 6 days 23:59:59 left, reported as 7.
    let info = resolve_subscription(
        Some(&profile("free", Some(start), None)),
        start + Duration::seconds(1),
    );
    assert_eq!(info.trial_days_remaining, 7);

    // Half a day left reports as 1.
    let info = resolve_subscription(
        Some(&profile("free", Some(start), None)),
        start + Duration::days(6) + Duration::hours(12),
    );
    assert_eq!(info.trial_days_remaining, 1);
}

#[test]
fn can_write_matches_status_everywhere() {
    let now = Utc::now();
    let cases = vec![
        None,
        Some(profile("free", Some(now), None)),
        Some(profile("free", Some(now - Duration::days(10)), None)),
        Some(profile("free", None, None)),
        Some(profile("pro", None, None)),
        Some(profile("pro", Some(now - Duration::days(10)), None)),
        Some(profile("pro", Some(now - Duration::days(10)), Some(now - Duration::days(1)))),
    ];

    for case in &cases {
        let info = resolve_subscription(case.as_ref(), now);
        assert_eq!(
            info.can_write,
            info.status != SubscriptionStatus::Expired,
            "write permission must follow status for plan {:?}",
            case.as_ref().map(|p| p.plan.as_str())
        );
    }
}
