//! Request handlers.
//!
//! Handlers extract the actor and request data, delegate to the
//! [`HourReportService`](hourbook_core::service::HourReportService) held in
//! application state, and map errors via [`AppError`](crate::error::AppError).

pub mod hour_report;
