//! Event entity model.

use giftwheel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of an event.
///
/// `Created` covers the whole pre-draw phase (registration open or closed);
/// `Drawn` means at least one draw has completed. The only transition is
/// `Created -> Drawn`, performed atomically with the assignment commit.
/// Re-draws keep the event in `Drawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status")]
pub enum EventStatus {
    #[sqlx(rename = "CREATED")]
    #[serde(rename = "CREATED")]
    Created,
    #[sqlx(rename = "DRAWN")]
    #[serde(rename = "DRAWN")]
    Drawn,
}

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    /// Lower bound of the gift budget, in whole currency units.
    pub min_amount: i32,
    /// Optional upper bound of the gift budget.
    pub max_amount: Option<i32>,
    /// Whether the host may see who gifts whom after the draw.
    pub reveal_to_host: bool,
    /// Gate on new registrations, independent of `status`.
    pub is_registration_open: bool,
    pub status: EventStatus,
    pub registration_deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub name: String,
    pub min_amount: i32,
    pub max_amount: Option<i32>,
    pub reveal_to_host: bool,
    pub registration_deadline: Option<Timestamp>,
}

/// Partial update of an event. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub min_amount: Option<i32>,
    pub max_amount: Option<i32>,
    pub reveal_to_host: Option<bool>,
    pub registration_deadline: Option<Timestamp>,
}
