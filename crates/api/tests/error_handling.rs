//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use giftwheel_api::error::AppError;
use giftwheel_core::draw::DrawError;
use giftwheel_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// CoreError mappings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Event",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Event with id 42 not found");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("registration is closed".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "registration is closed");
}

#[tokio::test]
async fn internal_core_error_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("pool exploded".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    // Internal detail must not leak to the client.
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// DrawError mappings (the draw failure taxonomy)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn too_few_participants_returns_422_precondition_failed() {
    let err = AppError::Draw(DrawError::TooFewParticipants { count: 1 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "PRECONDITION_FAILED");
    assert_eq!(
        json["error"],
        "need at least 2 participants to run a draw, found 1"
    );
}

#[tokio::test]
async fn generation_exhausted_returns_500() {
    let err = AppError::Draw(DrawError::GenerationExhausted { attempts: 1000 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "GENERATION_EXHAUSTED");
    assert_eq!(
        json["error"],
        "no valid assignment found after 1000 shuffle attempts"
    );
}

#[tokio::test]
async fn commit_failed_returns_503_and_signals_retry_safety() {
    let err = AppError::Draw(DrawError::CommitFailed("connection reset".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "COMMIT_FAILED");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("nothing was changed"), "got: {message}");
}

#[tokio::test]
async fn load_failed_is_sanitized_internal_error() {
    let err = AppError::Draw(DrawError::LoadFailed("connection reset".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// HTTP-specific mappings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("max_amount must not be below min_amount".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "max_amount must not be below min_amount");
}

#[tokio::test]
async fn database_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
