//! Shared query parameter types for API handlers.

use hourbook_core::hour_report::ReportFilter;
use serde::Deserialize;

/// Listing flags for `GET /hour-reports` (`?all`, `?pending`, `?rejected`).
///
/// A flag counts as set when present with any value other than `false`, so
/// both `?pending` and `?pending=true` select pending reports.
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilterParams {
    pub all: Option<String>,
    pub pending: Option<String>,
    pub rejected: Option<String>,
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some(v) if v != "false" && v != "0")
}

impl ReportFilterParams {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter::from_flags(flag(&self.all), flag(&self.pending), flag(&self.rejected))
    }
}
