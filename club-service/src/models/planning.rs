//! Volunteer-shift planning models for club-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A volunteer planning, optionally attached to an event. Owns shifts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Planning {
    pub planning_id: Uuid,
    pub tenant_id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: String,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a planning.
#[derive(Debug, Clone)]
pub struct CreatePlanning {
    pub tenant_id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: String,
}

/// A single shift slot on a planning. `volunteer_name` is filled when a
/// volunteer signs up (the QR registration flow lives outside this service).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub shift_id: Uuid,
    pub planning_id: Uuid,
    pub tenant_id: Uuid,
    pub role: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub volunteer_name: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a shift.
#[derive(Debug, Clone)]
pub struct CreateShift {
    pub tenant_id: Uuid,
    pub planning_id: Uuid,
    pub role: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
