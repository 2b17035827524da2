//! Draw orchestration.
//!
//! [`run_draw`] performs one complete raffle for an event: load the current
//! roster, generate a derangement over it, and hand the resulting
//! assignments to the store for an all-or-nothing commit that also moves
//! the event to its drawn state. The orchestrator never retries on its own;
//! every failure is surfaced to the caller with enough shape to decide
//! whether a retry makes sense (see [`DrawError`]).

use std::collections::HashMap;
use std::future::Future;

use crate::derangement::{self, DerangementError};
use crate::types::DbId;

/// Opaque error produced by a [`DrawStore`] implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The slice of a participant the draw needs: identity and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawParticipant {
    pub id: DbId,
    pub name: String,
}

/// One computed assignment: `giver` gifts to `recipient`.
///
/// The recipient's display name is denormalized into the update so the
/// participant record is self-contained after the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub giver_id: DbId,
    pub recipient_id: DbId,
    pub recipient_name: String,
}

/// Result of a successful draw.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DrawSummary {
    pub participant_count: usize,
}

/// Storage seam for the draw orchestrator.
///
/// `commit_draw` must be atomic: apply every assignment *and* the event's
/// transition to the drawn state, or change nothing at all. Partial
/// application must never be observable by a concurrent reader.
pub trait DrawStore: Send + Sync {
    /// Load the event's roster in a stable order.
    fn list_participants(
        &self,
        event_id: DbId,
    ) -> impl Future<Output = Result<Vec<DrawParticipant>, StoreError>> + Send;

    /// Atomically persist all assignments and mark the event drawn.
    fn commit_draw(
        &self,
        event_id: DbId,
        assignments: &[Assignment],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// Fewer than 2 registered participants. Retry only after more register.
    #[error("need at least 2 participants to run a draw, found {count}")]
    TooFewParticipants { count: usize },

    /// The generator hit its attempt ceiling. Indicates a broken randomness
    /// source; investigate rather than retry blindly.
    #[error("no valid assignment found after {attempts} shuffle attempts")]
    GenerationExhausted { attempts: u32 },

    /// Reading the roster failed. Nothing was written.
    #[error("failed to load participants")]
    LoadFailed(#[source] StoreError),

    /// The transactional commit failed. By the atomicity contract nothing
    /// changed, so re-running the whole draw is safe.
    #[error("failed to commit assignments")]
    CommitFailed(#[source] StoreError),
}

/// Run one complete draw for `event_id`.
///
/// Re-running on an already-drawn event is permitted: the draw is
/// recomputed from the current roster and prior assignments are
/// overwritten wholesale. It is never an incremental operation.
pub async fn run_draw<S: DrawStore>(store: &S, event_id: DbId) -> Result<DrawSummary, DrawError> {
    let participants = store
        .list_participants(event_id)
        .await
        .map_err(DrawError::LoadFailed)?;

    let count = participants.len();
    if count < 2 {
        return Err(DrawError::TooFewParticipants { count });
    }

    let ids: Vec<DbId> = participants.iter().map(|p| p.id).collect();
    let mapping = derangement::generate(&ids).map_err(|err| match err {
        DerangementError::AttemptsExhausted { attempts } => {
            DrawError::GenerationExhausted { attempts }
        }
        DerangementError::TooFewElements { count } => DrawError::TooFewParticipants { count },
    })?;

    let names: HashMap<DbId, &str> = participants
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let assignments: Vec<Assignment> = participants
        .iter()
        .map(|p| {
            let recipient_id = mapping[&p.id];
            Assignment {
                giver_id: p.id,
                recipient_id,
                recipient_name: names[&recipient_id].to_string(),
            }
        })
        .collect();

    store
        .commit_draw(event_id, &assignments)
        .await
        .map_err(DrawError::CommitFailed)?;

    Ok(DrawSummary {
        participant_count: count,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Created,
        Drawn,
    }

    /// In-memory store double. `commit_draw` applies assignments and the
    /// phase transition together, or fails without touching either.
    struct MemoryStore {
        participants: Mutex<Vec<DrawParticipant>>,
        committed: Mutex<Option<Vec<Assignment>>>,
        phase: Mutex<Phase>,
        fail_commit: bool,
    }

    impl MemoryStore {
        fn with_participants(named: &[(DbId, &str)]) -> Self {
            let participants = named
                .iter()
                .map(|(id, name)| DrawParticipant {
                    id: *id,
                    name: name.to_string(),
                })
                .collect();
            Self {
                participants: Mutex::new(participants),
                committed: Mutex::new(None),
                phase: Mutex::new(Phase::Created),
                fail_commit: false,
            }
        }

        fn failing_commit(named: &[(DbId, &str)]) -> Self {
            Self {
                fail_commit: true,
                ..Self::with_participants(named)
            }
        }

        fn phase(&self) -> Phase {
            *self.phase.lock().unwrap()
        }

        fn committed(&self) -> Option<Vec<Assignment>> {
            self.committed.lock().unwrap().clone()
        }
    }

    impl DrawStore for MemoryStore {
        async fn list_participants(
            &self,
            _event_id: DbId,
        ) -> Result<Vec<DrawParticipant>, StoreError> {
            Ok(self.participants.lock().unwrap().clone())
        }

        async fn commit_draw(
            &self,
            _event_id: DbId,
            assignments: &[Assignment],
        ) -> Result<(), StoreError> {
            if self.fail_commit {
                return Err("simulated store outage".into());
            }
            *self.committed.lock().unwrap() = Some(assignments.to_vec());
            *self.phase.lock().unwrap() = Phase::Drawn;
            Ok(())
        }
    }

    /// Assert the committed assignments form a self-free bijection over the
    /// roster, with recipient names matching recipient ids.
    fn assert_valid_commit(roster: &[(DbId, &str)], assignments: &[Assignment]) {
        assert_eq!(assignments.len(), roster.len());

        let ids: HashSet<DbId> = roster.iter().map(|(id, _)| *id).collect();
        let givers: HashSet<DbId> = assignments.iter().map(|a| a.giver_id).collect();
        let recipients: HashSet<DbId> = assignments.iter().map(|a| a.recipient_id).collect();
        assert_eq!(givers, ids);
        assert_eq!(recipients, ids);

        for a in assignments {
            assert_ne!(a.giver_id, a.recipient_id, "self-assignment");
            let expected_name = roster
                .iter()
                .find(|(id, _)| *id == a.recipient_id)
                .map(|(_, name)| *name)
                .unwrap();
            assert_eq!(a.recipient_name, expected_name);
        }
    }

    #[tokio::test]
    async fn fails_precondition_with_empty_roster() {
        let store = MemoryStore::with_participants(&[]);

        let err = run_draw(&store, 1).await.unwrap_err();

        assert_matches!(err, DrawError::TooFewParticipants { count: 0 });
        assert_eq!(store.phase(), Phase::Created);
        assert!(store.committed().is_none());
    }

    #[tokio::test]
    async fn fails_precondition_with_single_participant() {
        let store = MemoryStore::with_participants(&[(7, "Alice")]);

        let err = run_draw(&store, 1).await.unwrap_err();

        assert_matches!(err, DrawError::TooFewParticipants { count: 1 });
        assert_eq!(store.phase(), Phase::Created);
        assert!(store.committed().is_none());
    }

    #[tokio::test]
    async fn two_participants_produce_the_swap() {
        let roster = [(1, "Alice"), (2, "Bob")];
        let store = MemoryStore::with_participants(&roster);

        let summary = run_draw(&store, 1).await.unwrap();

        assert_eq!(summary.participant_count, 2);
        assert_eq!(store.phase(), Phase::Drawn);

        let committed = store.committed().unwrap();
        assert_valid_commit(&roster, &committed);
        // Only one derangement of two elements exists.
        let alice = committed.iter().find(|a| a.giver_id == 1).unwrap();
        assert_eq!(alice.recipient_id, 2);
        assert_eq!(alice.recipient_name, "Bob");
    }

    #[tokio::test]
    async fn three_participants_end_to_end() {
        let roster = [(1, "Alice"), (2, "Bob"), (3, "Carol")];
        let store = MemoryStore::with_participants(&roster);

        let summary = run_draw(&store, 1).await.unwrap();

        assert_eq!(summary.participant_count, 3);
        assert_eq!(store.phase(), Phase::Drawn);
        assert_valid_commit(&roster, &store.committed().unwrap());
    }

    #[tokio::test]
    async fn commit_failure_leaves_store_untouched() {
        let roster = [(1, "Alice"), (2, "Bob"), (3, "Carol")];
        let store = MemoryStore::failing_commit(&roster);

        let err = run_draw(&store, 1).await.unwrap_err();

        assert_matches!(err, DrawError::CommitFailed(_));
        assert_eq!(store.phase(), Phase::Created);
        assert!(store.committed().is_none());
    }

    #[tokio::test]
    async fn redraw_replaces_assignments_with_a_fresh_derangement() {
        let roster = [(1, "Alice"), (2, "Bob"), (3, "Carol"), (4, "Dave")];
        let store = MemoryStore::with_participants(&roster);

        run_draw(&store, 1).await.unwrap();
        assert_valid_commit(&roster, &store.committed().unwrap());

        // A second draw on an unchanged roster is a full recomputation,
        // not an incremental update; the result must again be valid.
        run_draw(&store, 1).await.unwrap();
        assert_eq!(store.phase(), Phase::Drawn);
        assert_valid_commit(&roster, &store.committed().unwrap());
    }
}
