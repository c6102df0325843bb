//! Data models for club-service.

mod client;
mod document;
mod event;
mod expense;
mod line_item;
mod planning;
mod profile;

pub use client::{Client, CreateClient, UpdateClient};
pub use document::{
    CreateDocument, Document, DocumentStatus, DocumentType, ListDocumentsFilter, UpdateDocument,
};
pub use event::{CreateEvent, Event, UpdateEvent};
pub use expense::{CreateExpense, Expense, UpdateExpense};
pub use line_item::{CreateLineItem, LineItem, UpdateLineItem};
pub use planning::{CreatePlanning, CreateShift, Planning, Shift};
pub use profile::BillingProfile;
