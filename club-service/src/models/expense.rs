//! Expense model for club-service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An expense recorded by the club.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub expense_id: Uuid,
    pub tenant_id: Uuid,
    pub label: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub incurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub tenant_id: Uuid,
    pub label: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub incurred_on: NaiveDate,
    pub notes: Option<String>,
}

/// Input for updating an expense.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpense {
    pub label: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub incurred_on: Option<NaiveDate>,
    pub notes: Option<String>,
}
