//! Write gate decision tests.

use chrono::{DateTime, Duration, Utc};
use club_core::error::AppError;
use club_service::billing::evaluate_write_access;
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
fn active_trial_passes_the_gate() {
    let now = Utc::now();
    let result = evaluate_write_access(
        Uuid::new_v4(),
        Ok(Some(profile("free", Some(now), None))),
        now,
    );

    let info = result.unwrap();
    assert!(info.can_write);
}

#[test]
fn profile_lookup_failure_denies() {
    let result = evaluate_write_access(
        Uuid::new_v4(),
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "connection refused"
        ))),
        Utc::now(),
    );

    match result {
        Err(AppError::WriteDenied { code, message }) => {
            assert_eq!(code, "write_denied");
            assert!(message.contains("no active subscription"), "{message}");
        }
        other => panic!("expected WriteDenied, got {other:?}"),
    }
}

#[test]
fn missing_profile_denies() {
    let result = evaluate_write_access(Uuid::new_v4(), Ok(None), Utc::now());
    assert!(matches!(result, Err(AppError::WriteDenied { .. })));
}

#[test]
fn expired_trial_denies_with_trial_message() {
    let now = Utc::now();
    let result = evaluate_write_access(
        Uuid::new_v4(),
        Ok(Some(profile("free", Some(now - Duration::days(30)), None))),
        now,
    );

    match result {
        Err(AppError::WriteDenied { message, .. }) => {
            assert!(message.contains("trial has ended"), "{message}");
        }
        other => panic!("expected WriteDenied, got {other:?}"),
    }
}

#[test]
fn paid_plan_passes_even_after_trial_window() {
    let now = Utc::now();
    let result = evaluate_write_access(
        Uuid::new_v4(),
        Ok(Some(profile("pro", Some(now - Duration::days(30)), None))),
        now,
    );

    assert!(result.unwrap().can_write);
}
