//! Document (quote/invoice) model for club-service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Quote,
    Invoice,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Quote => "quote",
            DocumentType::Invoice => "invoice",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "invoice" => DocumentType::Invoice,
            _ => DocumentType::Quote,
        }
    }
}

/// Document status. The vocabulary differs by document type: quotes move
/// `draft -> sent -> accepted|refused`, invoices `draft -> sent -> paid|overdue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Sent,
    Accepted,
    Refused,
    Paid,
    Overdue,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Sent => "sent",
            DocumentStatus::Accepted => "accepted",
            DocumentStatus::Refused => "refused",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => DocumentStatus::Sent,
            "accepted" => DocumentStatus::Accepted,
            "refused" => DocumentStatus::Refused,
            "paid" => DocumentStatus::Paid,
            "overdue" => DocumentStatus::Overdue,
            _ => DocumentStatus::Draft,
        }
    }

    /// Whether this status belongs to the given document type's vocabulary.
    pub fn valid_for(&self, document_type: DocumentType) -> bool {
        match self {
            DocumentStatus::Draft | DocumentStatus::Sent => true,
            DocumentStatus::Accepted | DocumentStatus::Refused => {
                document_type == DocumentType::Quote
            }
            DocumentStatus::Paid | DocumentStatus::Overdue => {
                document_type == DocumentType::Invoice
            }
        }
    }

    /// Whether a transition from `self` to `to` is allowed. Statuses only
    /// move forward: draft -> sent -> terminal.
    pub fn can_transition_to(&self, to: DocumentStatus) -> bool {
        matches!(
            (self, to),
            (DocumentStatus::Draft, DocumentStatus::Sent)
                | (DocumentStatus::Sent, DocumentStatus::Accepted)
                | (DocumentStatus::Sent, DocumentStatus::Refused)
                | (DocumentStatus::Sent, DocumentStatus::Paid)
                | (DocumentStatus::Sent, DocumentStatus::Overdue)
                | (DocumentStatus::Overdue, DocumentStatus::Paid)
        )
    }
}

/// A quote or invoice. Totals are not stored on this row: they are derived
/// from the current line items on every read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub document_id: Uuid,
    pub tenant_id: Uuid,
    pub document_type: String,
    pub status: String,
    pub client_id: Uuid,
    pub creation_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Filter parameters for listing documents.
#[derive(Debug, Clone, Default)]
pub struct ListDocumentsFilter {
    pub document_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub client_id: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub tenant_id: Uuid,
    pub document_type: DocumentType,
    pub client_id: Uuid,
    pub creation_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for updating a document (draft only).
#[derive(Debug, Clone, Default)]
pub struct UpdateDocument {
    pub client_id: Option<Uuid>,
    pub creation_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
