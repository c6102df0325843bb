//! CSV export of documents.
//!
//! Amounts are rounded to two decimals here and only here; persisted values
//! stay unrounded. The `vat_rate` column shows the first line item's rate,
//! matching the historical export format even when lines carry different
//! rates.

use crate::billing::{format_amount, DocumentTotals};
use crate::middleware::TenantId;
use crate::models::{DocumentType, ListDocumentsFilter};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use club_core::error::AppError;
use serde::Deserialize;

const EXPORT_LIMIT: i64 = 10_000;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub document_type: Option<DocumentType>,
}

pub async fn export_documents(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ListDocumentsFilter {
        document_type: params.document_type,
        limit: EXPORT_LIMIT,
        ..Default::default()
    };
    let documents = state.db.list_documents(tenant.0, &filter).await?;

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "document_id",
        "type",
        "status",
        "client_id",
        "creation_date",
        "due_date",
        "payment_date",
        "vat_rate",
        "total_ht",
        "total_vat",
        "total_ttc",
    ])
    .map_err(|e| AppError::InternalError(anyhow::anyhow!("CSV write failed: {}", e)))?;

    for document in documents {
        let items = state
            .db
            .get_line_items(tenant.0, document.document_id)
            .await?;
        let totals = DocumentTotals::compute(&items);
        let vat_rate = items
            .first()
            .and_then(|item| item.vat_rate)
            .map(|rate| rate.to_string())
            .unwrap_or_default();

        wtr.write_record([
            document.document_id.to_string(),
            document.document_type,
            document.status,
            document.client_id.to_string(),
            document.creation_date.to_string(),
            document.due_date.map(|d| d.to_string()).unwrap_or_default(),
            document
                .payment_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            vat_rate,
            format_amount(&totals.total_ht),
            format_amount(&totals.total_vat),
            format_amount(&totals.total_ttc),
        ])
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("CSV write failed: {}", e)))?;
    }

    let body = wtr
        .into_inner()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("CSV flush failed: {}", e)))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"documents.csv\"",
            ),
        ],
        body,
    ))
}
