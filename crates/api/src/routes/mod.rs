pub mod health;
pub mod hour_report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hour-reports                                    list, create
/// /hour-reports/all                                list every state
/// /hour-reports/new                                draft with default task
/// /hour-reports/{id}                               get, update, delete
/// /hour-reports/{id}/edit                          report with movable tasks
/// /hour-reports/{id}/approve                       approve (POST)
/// /hour-reports/{id}/reject                        reject (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/hour-reports", hour_report::router())
}
