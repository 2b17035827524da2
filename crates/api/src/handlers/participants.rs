//! Handlers for participant registration and self-service endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use giftwheel_core::error::CoreError;
use giftwheel_core::naming::normalize_name;
use giftwheel_core::types::DbId;
use giftwheel_db::models::event::Event;
use giftwheel_db::models::participant::{Participant, RegisterParticipant, UpdateWishes};
use giftwheel_db::repositories::{EventRepo, ParticipantRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub secret_word: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 2000))]
    pub wish_general: Option<String>,
    #[validate(length(max = 200))]
    pub wish_sizes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WishesRequest {
    #[validate(length(max = 2000))]
    pub wish_general: String,
    #[validate(length(max = 200))]
    pub wish_sizes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SecretWordRequest {
    #[validate(length(min = 1, max = 100))]
    pub secret_word: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// The recipient a participant gifts to, with the recipient's hints.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub recipient_id: DbId,
    pub recipient_name: String,
    pub wish_general: String,
    pub wish_sizes: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_event(state: &AppState, event_id: DbId) -> AppResult<Event> {
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Event",
                id: event_id,
            }
            .into()
        })
}

fn participant_not_found(id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "Participant",
        id,
    }
    .into()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /events/{id}/participants
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    input.validate()?;

    let normalized_name = normalize_name(&input.name);
    if normalized_name.is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }

    let event = load_event(&state, event_id).await?;
    if !event.is_registration_open {
        return Err(CoreError::Conflict("registration is closed for this event".into()).into());
    }
    if let Some(deadline) = event.registration_deadline {
        if chrono::Utc::now() > deadline {
            return Err(CoreError::Conflict("the registration deadline has passed".into()).into());
        }
    }

    if !ParticipantRepo::is_name_available(&state.pool, event_id, &normalized_name).await? {
        return Err(CoreError::Conflict(
            "this name is already taken, please choose a different one".into(),
        )
        .into());
    }

    // A concurrent registration of the same name slips past the check above;
    // the unique constraint turns that race into a 409.
    let participant = ParticipantRepo::register(
        &state.pool,
        event_id,
        &RegisterParticipant {
            name: input.name.trim().to_string(),
            normalized_name,
            secret_word: input.secret_word,
            email: input.email,
            wish_general: input.wish_general.unwrap_or_default(),
            wish_sizes: input.wish_sizes,
        },
    )
    .await?;

    tracing::info!(event_id, participant_id = participant.id, "Participant registered");
    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET /events/{id}/participants/availability?name=
pub async fn availability(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<AvailabilityResponse>> {
    let normalized_name = normalize_name(&params.name);
    if normalized_name.is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }

    load_event(&state, event_id).await?;
    let available =
        ParticipantRepo::is_name_available(&state.pool, event_id, &normalized_name).await?;
    Ok(Json(AvailabilityResponse { available }))
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// GET /events/{id}/participants
pub async fn list(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Participant>>>> {
    load_event(&state, event_id).await?;
    let participants = ParticipantRepo::list_by_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: participants }))
}

/// GET /events/{id}/participants/{participant_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Participant>> {
    let participant = ParticipantRepo::find_by_id(&state.pool, event_id, participant_id)
        .await?
        .ok_or_else(|| participant_not_found(participant_id))?;
    Ok(Json(participant))
}

/// PUT /events/{id}/participants/{participant_id}/wishes
pub async fn update_wishes(
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(DbId, DbId)>,
    Json(input): Json<WishesRequest>,
) -> AppResult<Json<Participant>> {
    input.validate()?;

    let participant = ParticipantRepo::update_wishes(
        &state.pool,
        event_id,
        participant_id,
        &UpdateWishes {
            wish_general: input.wish_general,
            wish_sizes: input.wish_sizes,
        },
    )
    .await?
    .ok_or_else(|| participant_not_found(participant_id))?;

    Ok(Json(participant))
}

/// PUT /events/{id}/participants/{participant_id}/secret-word
///
/// Host-initiated reset for a participant who forgot their secret word.
pub async fn reset_secret_word(
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(DbId, DbId)>,
    Json(input): Json<SecretWordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let updated =
        ParticipantRepo::reset_secret_word(&state.pool, event_id, participant_id, &input.secret_word)
            .await?;
    if !updated {
        return Err(participant_not_found(participant_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Assignment lookup
// ---------------------------------------------------------------------------

/// GET /events/{id}/participants/{participant_id}/assignment
///
/// Returns the recipient this participant gifts to. 404 until a draw has
/// run for the event.
pub async fn assignment(
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<AssignmentResponse>> {
    let participant = ParticipantRepo::find_by_id(&state.pool, event_id, participant_id)
        .await?
        .ok_or_else(|| participant_not_found(participant_id))?;

    let recipient_id = participant.assigned_to_id.ok_or(CoreError::NotFound {
        entity: "Assignment",
        id: participant_id,
    })?;

    let recipient = ParticipantRepo::find_by_id(&state.pool, event_id, recipient_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "assigned recipient {recipient_id} missing for participant {participant_id}"
            ))
        })?;

    Ok(Json(AssignmentResponse {
        recipient_id: recipient.id,
        recipient_name: recipient.name,
        wish_general: recipient.wish_general,
        wish_sizes: recipient.wish_sizes,
    }))
}
