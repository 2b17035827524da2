//! Repository for the `participants` table.

use giftwheel_core::types::DbId;
use sqlx::PgPool;

use crate::models::participant::{Participant, RegisterParticipant, UpdateWishes};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, name, normalized_name, secret_word, email, \
    wish_general, wish_sizes, assigned_to_id, assigned_to_name, created_at, updated_at";

/// Provides registration and roster operations for participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a new participant for an event, returning the created row.
    ///
    /// The `uq_participants_event_normalized_name` constraint backstops the
    /// availability check against concurrent registrations of the same name.
    pub async fn register(
        pool: &PgPool,
        event_id: DbId,
        input: &RegisterParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants
                (event_id, name, normalized_name, secret_word, email, wish_general, wish_sizes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(event_id)
            .bind(&input.name)
            .bind(&input.normalized_name)
            .bind(&input.secret_word)
            .bind(&input.email)
            .bind(&input.wish_general)
            .bind(&input.wish_sizes)
            .fetch_one(pool)
            .await
    }

    /// Find a participant by ID, scoped to its event.
    pub async fn find_by_id(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1 AND event_id = $2");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// List an event's roster in registration order.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Participant>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether a normalized name is still free within an event.
    pub async fn is_name_available(
        pool: &PgPool,
        event_id: DbId,
        normalized_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let taken: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM participants WHERE event_id = $1 AND normalized_name = $2",
        )
        .bind(event_id)
        .bind(normalized_name)
        .fetch_optional(pool)
        .await?;
        Ok(taken.is_none())
    }

    /// Update a participant's gift hints. Returns the updated row, or
    /// `None` if the participant does not exist in this event.
    pub async fn update_wishes(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateWishes,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET wish_general = $3, wish_sizes = $4, updated_at = now()
             WHERE id = $1 AND event_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.wish_general)
            .bind(&input.wish_sizes)
            .fetch_optional(pool)
            .await
    }

    /// Replace a participant's secret word (host-initiated reset).
    /// Returns `true` if a row was updated.
    pub async fn reset_secret_word(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        new_secret_word: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE participants SET secret_word = $3, updated_at = now()
             WHERE id = $1 AND event_id = $2",
        )
        .bind(id)
        .bind(event_id)
        .bind(new_secret_word)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
