//! club-service: multi-tenant administration backend for sports clubs.
//!
//! Owns client/member records, quotes and invoices with line items, expenses,
//! events and volunteer-shift plannings. Every mutation passes through the
//! subscription write gate; document totals are always recomputed from line
//! items rather than trusted from storage.
pub mod billing;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
