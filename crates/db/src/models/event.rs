//! Calendar event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use friday_core::types::{DbId, Owned, Timestamp};

/// An event row from the `events` table.
///
/// `recur_rule` is the opaque RFC 5545 RECUR text (the part after
/// `RRULE:`); it is validated on write and never interpreted elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub place: Option<String>,
    pub recur_rule: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Event {
    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// Full event payload, used for both creation and update.
///
/// Updates replace every field, matching the save shape; there is no
/// partial patch.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub place: Option<String>,
    pub recur_rule: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
