//! Handlers for event endpoints, including the draw trigger.
//!
//! Authorization is the deployment's concern (reverse proxy, gateway, or a
//! future auth layer); handlers here assume the caller is already allowed
//! to manage the event and never read ambient session state.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use giftwheel_core::error::CoreError;
use giftwheel_core::types::{DbId, Timestamp};
use giftwheel_db::models::event::{CreateEvent, Event, EventStatus, UpdateEvent};
use giftwheel_db::repositories::EventRepo;
use giftwheel_db::PgDrawStore;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub min_amount: i32,
    #[validate(range(min = 0))]
    pub max_amount: Option<i32>,
    #[serde(default)]
    pub reveal_to_host: bool,
    pub registration_deadline: Option<Timestamp>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub min_amount: Option<i32>,
    #[validate(range(min = 0))]
    pub max_amount: Option<i32>,
    pub reveal_to_host: Option<bool>,
    pub registration_deadline: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    pub is_open: bool,
}

/// Response for a completed draw.
#[derive(Debug, Serialize)]
pub struct DrawResponse {
    pub status: EventStatus,
    pub participant_count: usize,
}

/// Reject a budget range whose upper bound is below its lower bound.
fn check_budget_range(min_amount: i32, max_amount: Option<i32>) -> AppResult<()> {
    if let Some(max) = max_amount {
        if max < min_amount {
            return Err(AppError::BadRequest(
                "max_amount must not be below min_amount".into(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    input.validate()?;
    check_budget_range(input.min_amount, input.max_amount)?;
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            name: input.name.trim().to_string(),
            min_amount: input.min_amount,
            max_amount: input.max_amount,
            reveal_to_host: input.reveal_to_host,
            registration_deadline: input.registration_deadline,
        },
    )
    .await?;

    tracing::info!(event_id = event.id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;
    Ok(Json(event))
}

/// PUT /events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    input.validate()?;
    if let (Some(min), Some(max)) = (input.min_amount, input.max_amount) {
        check_budget_range(min, Some(max))?;
    }

    let event = EventRepo::update(
        &state.pool,
        id,
        &UpdateEvent {
            name: input.name.map(|n| n.trim().to_string()),
            min_amount: input.min_amount,
            max_amount: input.max_amount,
            reveal_to_host: input.reveal_to_host,
            registration_deadline: input.registration_deadline,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Event",
        id,
    })?;

    Ok(Json(event))
}

/// DELETE /events/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Event",
            id,
        }
        .into());
    }
    tracing::info!(event_id = id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /events/{id}/registration
pub async fn set_registration(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RegistrationRequest>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::set_registration_open(&state.pool, id, input.is_open)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// Draw
// ---------------------------------------------------------------------------

/// POST /events/{id}/draw
///
/// Runs the raffle: every participant is assigned exactly one other
/// participant as gift recipient, and the event moves to `DRAWN`, in a
/// single transaction. Calling this on an already-drawn event recomputes
/// everything and overwrites the previous assignments.
pub async fn run_draw(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DrawResponse>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;

    tracing::info!(event_id = id, event_name = %event.name, "Draw requested");

    let store = PgDrawStore::new(state.pool.clone());
    let summary = giftwheel_core::draw::run_draw(&store, id).await?;

    Ok(Json(DrawResponse {
        status: EventStatus::Drawn,
        participant_count: summary.participant_count,
    }))
}
