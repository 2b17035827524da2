//! Route definitions.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                                  create
/// /events/{id}                                             get, update, delete
/// /events/{id}/registration                                open/close registration
/// /events/{id}/draw                                        run the draw (POST)
/// /events/{id}/participants                                roster, register
/// /events/{id}/participants/availability                   name availability
/// /events/{id}/participants/{participant_id}               get
/// /events/{id}/participants/{participant_id}/wishes        update gift hints
/// /events/{id}/participants/{participant_id}/secret-word   host reset
/// /events/{id}/participants/{participant_id}/assignment    gift recipient
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/events", events::router())
}
