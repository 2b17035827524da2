//! Routes for events and their nested participant resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{events, participants};
use crate::state::AppState;

/// Routes mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(events::create))
        .route(
            "/{id}",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::delete),
        )
        .route("/{id}/registration", put(events::set_registration))
        .route("/{id}/draw", post(events::run_draw))
        .route(
            "/{id}/participants",
            get(participants::list).post(participants::register),
        )
        .route(
            "/{id}/participants/availability",
            get(participants::availability),
        )
        .route(
            "/{id}/participants/{participant_id}",
            get(participants::get_by_id),
        )
        .route(
            "/{id}/participants/{participant_id}/wishes",
            put(participants::update_wishes),
        )
        .route(
            "/{id}/participants/{participant_id}/secret-word",
            put(participants::reset_secret_word),
        )
        .route(
            "/{id}/participants/{participant_id}/assignment",
            get(participants::assignment),
        )
}
