//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use hourbook_api::error::AppError;
use hourbook_core::error::CoreError;
use hourbook_core::validation::unknown_reference;
use hourbook_db::stores::into_core_error;
use validator::{ValidationError, ValidationErrors};

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "HourReport",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "HourReport with id 42 not found");
}

#[tokio::test]
async fn test_forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden(
        "Not allowed to approve this hour report".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Not allowed to approve this hour report");
}

#[tokio::test]
async fn test_unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_fields_return_422_with_field_messages() {
    let mut errors = ValidationErrors::new();
    errors.add(
        "hours",
        ValidationError::new("range").with_message(Cow::Borrowed("must be between 1 and 24")),
    );
    errors.add("date", ValidationError::new("required"));

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidFields(errors))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["hours"][0], "must be between 1 and 24");
    assert_eq!(json["fields"]["date"][0], "required");
}

#[tokio::test]
async fn test_unknown_reference_names_the_field() {
    let (status, json) = error_to_response(AppError::Core(unknown_reference("task_id"))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["fields"]["task_id"][0], "does not exist");
}

#[tokio::test]
async fn test_bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn test_internal_errors_are_sanitized() {
    let err = AppError::Core(CoreError::Internal("connection string postgres://x".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_database_failures_surface_as_sanitized_500() {
    let err = AppError::from(into_core_error(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
