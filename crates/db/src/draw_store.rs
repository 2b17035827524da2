//! Postgres implementation of the core's draw-store seam.
//!
//! The commit runs as a single transaction so the N participant updates and
//! the event's `CREATED -> DRAWN` transition are all-or-nothing. A row lock
//! on the event serializes concurrent draws for the same event: a second
//! caller blocks on `FOR UPDATE` until the first commit lands, then applies
//! its own complete derangement on top (last writer wins, never a mix).

use giftwheel_core::draw::{Assignment, DrawParticipant, DrawStore, StoreError};
use giftwheel_core::types::DbId;

use crate::DbPool;

/// [`DrawStore`] backed by the `events` and `participants` tables.
#[derive(Clone)]
pub struct PgDrawStore {
    pool: DbPool,
}

impl PgDrawStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, thiserror::Error)]
enum CommitError {
    #[error("event {id} no longer exists")]
    EventMissing { id: DbId },

    #[error("participant {id} left the event while the draw was running")]
    RosterChanged { id: DbId },
}

impl DrawStore for PgDrawStore {
    async fn list_participants(
        &self,
        event_id: DbId,
    ) -> Result<Vec<DrawParticipant>, StoreError> {
        let rows: Vec<(DbId, String)> =
            sqlx::query_as("SELECT id, name FROM participants WHERE event_id = $1 ORDER BY id")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| DrawParticipant { id, name })
            .collect())
    }

    async fn commit_draw(
        &self,
        event_id: DbId,
        assignments: &[Assignment],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Take the event row lock first; concurrent draws queue up here.
        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(Box::new(CommitError::EventMissing { id: event_id }));
        }

        for assignment in assignments {
            let result = sqlx::query(
                "UPDATE participants
                 SET assigned_to_id = $1, assigned_to_name = $2, updated_at = now()
                 WHERE id = $3 AND event_id = $4",
            )
            .bind(assignment.recipient_id)
            .bind(&assignment.recipient_name)
            .bind(assignment.giver_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

            // The roster drifted between load and commit; dropping the
            // transaction here rolls back every prior update.
            if result.rows_affected() != 1 {
                return Err(Box::new(CommitError::RosterChanged {
                    id: assignment.giver_id,
                }));
            }
        }

        sqlx::query("UPDATE events SET status = 'DRAWN', updated_at = now() WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            event_id,
            participant_count = assignments.len(),
            "Draw committed"
        );
        Ok(())
    }
}
