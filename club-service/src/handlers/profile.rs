//! Billing profile and subscription state endpoints.
//!
//! These are the only mutating endpoints that bypass the write gate:
//! creating the profile is what starts the trial, and plan changes are
//! driven by the payment processor, which must never be blocked by
//! trial-expiry logic.

use crate::billing::resolve_subscription;
use crate::middleware::TenantId;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use club_core::error::AppError;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub club_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub plan: String,
    pub subscription_ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<crate::models::BillingProfile>,
    pub subscription: crate::billing::SubscriptionInfo,
}

/// Return the tenant's profile and resolved subscription state. A tenant
/// without a profile gets an expired, read-only state rather than an error.
pub async fn get_profile(
    State(state): State<AppState>,
    tenant: TenantId,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.db.get_billing_profile(tenant.0).await?;
    let subscription = resolve_subscription(profile.as_ref(), Utc::now());

    Ok(Json(ProfileResponse {
        profile,
        subscription,
    }))
}

/// Initialize the tenant's billing profile and start its trial. Conflicts if
/// the profile already exists; the trial start is immutable.
pub async fn create_profile(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = state
        .db
        .create_billing_profile(tenant.0, &payload.club_name)
        .await?;
    let subscription = resolve_subscription(Some(&profile), Utc::now());

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            profile: Some(profile),
            subscription,
        }),
    ))
}

/// Record a plan change confirmed by the payment processor.
pub async fn update_plan(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.plan != "free" && payload.plan != "pro" {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Unknown plan '{}' (expected 'free' or 'pro')",
            payload.plan
        )));
    }

    let profile = state
        .db
        .update_plan(tenant.0, &payload.plan, payload.subscription_ends_at)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Billing profile not found")))?;

    let subscription = resolve_subscription(Some(&profile), Utc::now());

    Ok(Json(ProfileResponse {
        profile: Some(profile),
        subscription,
    }))
}
