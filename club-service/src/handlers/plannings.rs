//! Volunteer-shift planning endpoints.

use crate::billing::require_write_access;
use crate::handlers::page_window;
use crate::middleware::TenantId;
use crate::models::{CreatePlanning, CreateShift, Planning, Shift};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use club_core::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanningRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShiftRequest {
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AssignShiftRequest {
    /// `None` clears the assignment and reopens the slot.
    pub volunteer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// A planning with its shifts.
#[derive(Debug, Serialize)]
pub struct PlanningResponse {
    #[serde(flatten)]
    pub planning: Planning,
    pub shifts: Vec<Shift>,
}

pub async fn create_planning(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreatePlanningRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    if let Some(event_id) = payload.event_id {
        if state.db.get_event(tenant.0, event_id).await?.is_none() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Event does not exist"
            )));
        }
    }

    let planning = state
        .db
        .create_planning(&CreatePlanning {
            tenant_id: tenant.0,
            event_id: payload.event_id,
            title: payload.title,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlanningResponse {
            planning,
            shifts: Vec::new(),
        }),
    ))
}

pub async fn list_plannings(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page_window(params.page, params.page_size);
    let plannings = state.db.list_plannings(tenant.0, limit, offset).await?;
    Ok(Json(plannings))
}

pub async fn get_planning(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(planning_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let planning = state
        .db
        .get_planning(tenant.0, planning_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Planning not found")))?;

    let shifts = state.db.get_shifts(tenant.0, planning_id).await?;

    Ok(Json(PlanningResponse { planning, shifts }))
}

pub async fn delete_planning(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(planning_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let deleted = state.db.delete_planning(tenant.0, planning_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Planning not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_shift(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(planning_id): Path<Uuid>,
    Json(payload): Json<CreateShiftRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    if payload.ends_at <= payload.starts_at {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Shift must end after it starts"
        )));
    }

    let shift = state
        .db
        .add_shift(&CreateShift {
            tenant_id: tenant.0,
            planning_id,
            role: payload.role,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

pub async fn assign_shift(
    State(state): State<AppState>,
    tenant: TenantId,
    Path((planning_id, shift_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignShiftRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let shift = state
        .db
        .assign_shift(
            tenant.0,
            planning_id,
            shift_id,
            payload.volunteer_name.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Shift not found")))?;

    Ok(Json(shift))
}

pub async fn remove_shift(
    State(state): State<AppState>,
    tenant: TenantId,
    Path((planning_id, shift_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let removed = state
        .db
        .remove_shift(tenant.0, planning_id, shift_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound(anyhow::anyhow!("Shift not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
