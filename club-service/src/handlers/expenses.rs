//! Expense endpoints.

use crate::billing::require_write_access;
use crate::handlers::page_window;
use crate::middleware::TenantId;
use crate::models::{CreateExpense, UpdateExpense};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use club_core::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub incurred_on: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateExpenseRequest {
    pub label: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub incurred_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn create_expense(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    let expense = state
        .db
        .create_expense(&CreateExpense {
            tenant_id: tenant.0,
            label: payload.label,
            amount: payload.amount,
            category: payload.category,
            incurred_on: payload.incurred_on,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page_window(params.page, params.page_size);
    let expenses = state.db.list_expenses(tenant.0, limit, offset).await?;
    Ok(Json(expenses))
}

pub async fn get_expense(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(expense_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let expense = state
        .db
        .get_expense(tenant.0, expense_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Expense not found")))?;
    Ok(Json(expense))
}

pub async fn update_expense(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let expense = state
        .db
        .update_expense(
            tenant.0,
            expense_id,
            &UpdateExpense {
                label: payload.label,
                amount: payload.amount,
                category: payload.category,
                incurred_on: payload.incurred_on,
                notes: payload.notes,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Expense not found")))?;

    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(expense_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let deleted = state.db.delete_expense(tenant.0, expense_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Expense not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
