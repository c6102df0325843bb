//! Quote/invoice endpoints.
//!
//! Totals are recomputed from the current item list on every read; a stored
//! total that disagreed with the items would never be visible.

use crate::billing::{require_write_access, DocumentTotals};
use crate::handlers::page_window;
use crate::middleware::TenantId;
use crate::models::{
    CreateDocument, CreateLineItem, Document, DocumentStatus, DocumentType, LineItem,
    ListDocumentsFilter, UpdateDocument, UpdateLineItem,
};
use crate::services::metrics::record_document_operation;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use club_core::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    pub document_type: DocumentType,
    pub client_id: Uuid,
    pub creation_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateDocumentRequest {
    pub client_id: Option<Uuid>,
    pub creation_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DocumentStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLineItemRequest {
    #[validate(length(min = 1, max = 500))]
    pub designation: String,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateLineItemRequest {
    pub designation: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentListParams {
    pub document_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub client_id: Option<Uuid>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// A document with its items and derived totals.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub document: Document,
    pub line_items: Vec<LineItem>,
    pub totals: DocumentTotals,
}

impl DocumentResponse {
    fn new(document: Document, line_items: Vec<LineItem>) -> Self {
        let totals = DocumentTotals::compute(&line_items);
        Self {
            document,
            line_items,
            totals,
        }
    }
}

async fn load_response(
    state: &AppState,
    tenant_id: Uuid,
    document: Document,
) -> Result<DocumentResponse, AppError> {
    let items = state
        .db
        .get_line_items(tenant_id, document.document_id)
        .await?;
    Ok(DocumentResponse::new(document, items))
}

pub async fn create_document(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    if state.db.get_client(tenant.0, payload.client_id).await?.is_none() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Client does not exist"
        )));
    }

    let document = state
        .db
        .create_document(&CreateDocument {
            tenant_id: tenant.0,
            document_type: payload.document_type,
            client_id: payload.client_id,
            creation_date: payload.creation_date.unwrap_or_else(|| Utc::now().date_naive()),
            due_date: payload.due_date,
            notes: payload.notes,
        })
        .await?;

    record_document_operation(&tenant.0.to_string(), "create");

    let response = load_response(&state, tenant.0, document).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_documents(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<DocumentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page_window(params.page, params.page_size);
    let filter = ListDocumentsFilter {
        document_type: params.document_type,
        status: params.status,
        client_id: params.client_id,
        limit,
        offset,
    };

    let documents = state.db.list_documents(tenant.0, &filter).await?;

    let mut responses = Vec::with_capacity(documents.len());
    for document in documents {
        responses.push(load_response(&state, tenant.0, document).await?);
    }

    Ok(Json(responses))
}

pub async fn get_document(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = state
        .db
        .get_document(tenant.0, document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    let response = load_response(&state, tenant.0, document).await?;
    Ok(Json(response))
}

pub async fn update_document(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let document = state
        .db
        .update_document(
            tenant.0,
            document_id,
            &UpdateDocument {
                client_id: payload.client_id,
                creation_date: payload.creation_date,
                due_date: payload.due_date,
                notes: payload.notes,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    record_document_operation(&tenant.0.to_string(), "update");

    let response = load_response(&state, tenant.0, document).await?;
    Ok(Json(response))
}

pub async fn update_document_status(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let document = state
        .db
        .update_document_status(
            tenant.0,
            document_id,
            payload.status,
            Utc::now().date_naive(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    record_document_operation(&tenant.0.to_string(), "status_change");

    let response = load_response(&state, tenant.0, document).await?;
    Ok(Json(response))
}

pub async fn delete_document(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let deleted = state.db.delete_document(tenant.0, document_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Document not found")));
    }

    record_document_operation(&tenant.0.to_string(), "delete");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_line_item(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<CreateLineItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;
    payload.validate()?;

    let line_item = state
        .db
        .add_line_item(&CreateLineItem {
            tenant_id: tenant.0,
            document_id,
            designation: payload.designation,
            description: payload.description,
            quantity: payload.quantity,
            unit_price: payload.unit_price,
            vat_rate: payload.vat_rate,
            sort_order: payload.sort_order,
        })
        .await?;

    record_document_operation(&tenant.0.to_string(), "add_item");

    Ok((StatusCode::CREATED, Json(line_item)))
}

pub async fn update_line_item(
    State(state): State<AppState>,
    tenant: TenantId,
    Path((document_id, line_item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateLineItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let line_item = state
        .db
        .update_line_item(
            tenant.0,
            document_id,
            line_item_id,
            &UpdateLineItem {
                designation: payload.designation,
                description: payload.description,
                quantity: payload.quantity,
                unit_price: payload.unit_price,
                vat_rate: payload.vat_rate,
                sort_order: payload.sort_order,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Line item not found")))?;

    record_document_operation(&tenant.0.to_string(), "update_item");

    Ok(Json(line_item))
}

pub async fn remove_line_item(
    State(state): State<AppState>,
    tenant: TenantId,
    Path((document_id, line_item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    require_write_access(&state.db, tenant.0).await?;

    let removed = state
        .db
        .remove_line_item(tenant.0, document_id, line_item_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound(anyhow::anyhow!("Line item not found")));
    }

    record_document_operation(&tenant.0.to_string(), "remove_item");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlong_notes_fail_validation() {
        let request = CreateDocumentRequest {
            document_type: DocumentType::Quote,
            client_id: Uuid::new_v4(),
            creation_date: None,
            due_date: None,
            notes: Some("x".repeat(2001)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn reasonable_notes_pass_validation() {
        let request = CreateDocumentRequest {
            document_type: DocumentType::Invoice,
            client_id: Uuid::new_v4(),
            creation_date: None,
            due_date: None,
            notes: Some("Annual membership".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
