//! Participant entity model.

use giftwheel_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `participants` table.
///
/// `secret_word` is the participant's self-service credential. It is stored
/// and resettable by the host but never serialized into responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub event_id: DbId,
    pub name: String,
    /// Lowercased, trimmed form of `name`; unique per event.
    pub normalized_name: String,
    #[serde(skip_serializing)]
    pub secret_word: String,
    pub email: Option<String>,
    /// Free-text gift hints.
    pub wish_general: String,
    pub wish_sizes: Option<String>,
    /// Set only after a successful draw: who this participant gifts to.
    pub assigned_to_id: Option<DbId>,
    pub assigned_to_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for registering a participant.
#[derive(Debug, Clone)]
pub struct RegisterParticipant {
    pub name: String,
    pub normalized_name: String,
    pub secret_word: String,
    pub email: Option<String>,
    pub wish_general: String,
    pub wish_sizes: Option<String>,
}

/// Update of a participant's gift hints.
#[derive(Debug, Clone)]
pub struct UpdateWishes {
    pub wish_general: String,
    pub wish_sizes: Option<String>,
}
