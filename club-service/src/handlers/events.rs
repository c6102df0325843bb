//! Event endpoints.

use crate::billing::require_write_access;
use crate::handlers::page_window;
use crate::middleware::TenantId;
use crate::models::{CreateEvent, UpdateEvent};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use club_core::error::AppError;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn create_event(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    if let Some(ends_at) = payload.ends_at {
        if ends_at <= payload.starts_at {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Event must end after it starts"
            )));
        }
    }

    let event = state
        .db
        .create_event(&CreateEvent {
            tenant_id: tenant.0,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page_window(params.page, params.page_size);
    let events = state.db.list_events(tenant.0, limit, offset).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .db
        .get_event(tenant.0, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Event not found")))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let event = state
        .db
        .update_event(
            tenant.0,
            event_id,
            &UpdateEvent {
                title: payload.title,
                description: payload.description,
                location: payload.location,
                starts_at: payload.starts_at,
                ends_at: payload.ends_at,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Event not found")))?;

    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let deleted = state.db.delete_event(tenant.0, event_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Event not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
