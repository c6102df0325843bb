//! Line item model for club-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One billable row on a quote or invoice.
///
/// Numeric fields are optional: draft documents are allowed to carry
/// partially-populated items, and the totals engine degrades missing values
/// to zero instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub document_id: Uuid,
    pub tenant_id: Uuid,
    pub designation: String,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    /// VAT percentage, e.g. 7.7 meaning 7.7%.
    pub vat_rate: Option<Decimal>,
    pub sort_order: i32,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a line item.
#[derive(Debug, Clone)]
pub struct CreateLineItem {
    pub tenant_id: Uuid,
    pub document_id: Uuid,
    pub designation: String,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub sort_order: i32,
}

/// Input for updating a line item.
#[derive(Debug, Clone, Default)]
pub struct UpdateLineItem {
    pub designation: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub sort_order: Option<i32>,
}
