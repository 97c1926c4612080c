//! Route definitions for hour reports.
//!
//! ```text
//! GET    /                      list_hour_reports (?pending, ?rejected, ?all)
//! POST   /                      create_hour_report
//! GET    /all                   list_all_hour_reports
//! GET    /new                   new_hour_report
//! GET    /{id}                  get_hour_report
//! PUT    /{id}                  update_hour_report
//! DELETE /{id}                  delete_hour_report
//! GET    /{id}/edit             edit_hour_report
//! POST   /{id}/approve          approve_hour_report
//! POST   /{id}/reject           reject_hour_report
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hour_report;
use crate::state::AppState;

/// Hour-report routes, mounted at `/hour-reports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(hour_report::list_hour_reports).post(hour_report::create_hour_report),
        )
        .route("/all", get(hour_report::list_all_hour_reports))
        .route("/new", get(hour_report::new_hour_report))
        .route(
            "/{id}",
            get(hour_report::get_hour_report)
                .put(hour_report::update_hour_report)
                .delete(hour_report::delete_hour_report),
        )
        .route("/{id}/edit", get(hour_report::edit_hour_report))
        .route("/{id}/approve", post(hour_report::approve_hour_report))
        .route("/{id}/reject", post(hour_report::reject_hour_report))
}
