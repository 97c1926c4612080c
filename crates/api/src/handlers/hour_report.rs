//! Handlers for hour reports and their approval workflow.
//!
//! Every handler acts on behalf of the authenticated user; ownership and
//! approval rights are decided by the service's authorization gate.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hourbook_core::hour_report::{CreateHourReport, UpdateHourReport};
use hourbook_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ReportFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Turn a malformed JSON body into a 400 instead of axum's plain-text rejection.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Like [`json_body`], but a request without a JSON content type carries no
/// changes.
fn optional_json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        payload => json_body(payload),
    }
}

/* --------------------------------------------------------------------------
Reads
-------------------------------------------------------------------------- */

/// GET /api/v1/hour-reports
///
/// The caller's own reports. Defaults to pending and rejected reports;
/// `?pending`, `?rejected` and `?all` narrow or widen the listing.
pub async fn list_hour_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<impl IntoResponse> {
    let reports = state
        .hour_reports
        .list(&auth.actor(), params.filter())
        .await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/hour-reports/all
pub async fn list_all_hour_reports(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reports = state.hour_reports.list_all(&auth.actor()).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/hour-reports/new
///
/// Unsaved draft preselecting the most recent project's first task.
pub async fn new_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let form = state.hour_reports.new_draft(&auth.actor()).await?;
    Ok(Json(DataResponse { data: form }))
}

/// GET /api/v1/hour-reports/{id}
pub async fn get_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = state.hour_reports.get(&auth.actor(), id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/hour-reports/{id}/edit
pub async fn edit_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let form = state.hour_reports.edit_form(&auth.actor(), id).await?;
    Ok(Json(DataResponse { data: form }))
}

/* --------------------------------------------------------------------------
Writes
-------------------------------------------------------------------------- */

/// POST /api/v1/hour-reports
///
/// Create a pending report owned by the caller.
pub async fn create_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateHourReport>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = json_body(payload)?;
    let report = state.hour_reports.create(&auth.actor(), input).await?;

    tracing::info!(
        user_id = auth.user_id,
        report_id = report.id,
        task_id = report.task_id,
        hours = report.hours,
        "Hour report created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// PUT /api/v1/hour-reports/{id}
///
/// Edit a report. The report returns to pending whatever its prior state.
pub async fn update_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateHourReport>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = json_body(payload)?;
    let report = state.hour_reports.update(&auth.actor(), id, input).await?;

    tracing::info!(user_id = auth.user_id, report_id = id, "Hour report updated");

    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/hour-reports/{id}
pub async fn delete_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.hour_reports.destroy(&auth.actor(), id).await?;

    tracing::info!(user_id = auth.user_id, report_id = id, "Hour report deleted");

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Approval workflow
-------------------------------------------------------------------------- */

/// POST /api/v1/hour-reports/{id}/approve
///
/// Approve a report. An optional body applies attribute changes in the same
/// write.
pub async fn approve_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateHourReport>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = optional_json_body(payload)?;
    let report = state.hour_reports.approve(&auth.actor(), id, input).await?;

    tracing::info!(
        user_id = auth.user_id,
        report_id = id,
        state = report.state.as_str(),
        "Hour report approved"
    );

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/hour-reports/{id}/reject
pub async fn reject_hour_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateHourReport>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = optional_json_body(payload)?;
    let report = state.hour_reports.reject(&auth.actor(), id, input).await?;

    tracing::info!(
        user_id = auth.user_id,
        report_id = id,
        state = report.state.as_str(),
        "Hour report rejected"
    );

    Ok(Json(DataResponse { data: report }))
}
