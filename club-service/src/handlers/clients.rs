//! Client/member endpoints.

use crate::billing::require_write_access;
use crate::handlers::page_window;
use crate::middleware::TenantId;
use crate::models::{CreateClient, UpdateClient};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use club_core::error::AppError;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn create_client(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    let client = state
        .db
        .create_client(&CreateClient {
            tenant_id: tenant.0,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page_window(params.page, params.page_size);
    let clients = state.db.list_clients(tenant.0, limit, offset).await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = state
        .db
        .get_client(tenant.0, client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))?;
    Ok(Json(client))
}

pub async fn update_client(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let client = state
        .db
        .update_client(
            tenant.0,
            client_id,
            &UpdateClient {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                address: payload.address,
                notes: payload.notes,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))?;

    Ok(Json(client))
}

pub async fn delete_client(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let deleted = state.db.delete_client(tenant.0, client_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Client not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
