//! Hourbook domain layer.
//!
//! Holds the hour-report domain types, attribute validation, the permission
//! policy, the collaborator traits the persistence layer implements, and the
//! [`service::HourReportService`] that ties them together. Nothing in here
//! performs I/O directly.

pub mod authorization;
pub mod error;
pub mod hour_report;
pub mod project_cost;
pub mod roles;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod memory;
