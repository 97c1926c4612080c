//! Hour report input DTOs, list filters, and form payloads.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::project_cost::{HourReport, ReportState};
use crate::types::{Date, DbId};

/// Lower bound on hours in a single report.
pub const MIN_HOURS_PER_REPORT: i32 = 1;

/// Upper bound on hours in a single report (one calendar day).
pub const MAX_HOURS_PER_REPORT: i32 = 24;

/// Maximum length of a report's name.
pub const MAX_NAME_LENGTH: u64 = 255;

/// Maximum length of a report's description.
pub const MAX_DESCRIPTION_LENGTH: u64 = 10_000;

/// Client-supplied attributes for a new report.
///
/// Owner and state are deliberately absent: they are always taken from the
/// acting user and the workflow, and any such keys in a request body are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateHourReport {
    #[validate(required(message = "can't be blank"))]
    pub task_id: Option<DbId>,
    #[validate(required(message = "can't be blank"))]
    pub date: Option<Date>,
    #[validate(
        required(message = "can't be blank"),
        range(
            min = MIN_HOURS_PER_REPORT,
            max = MAX_HOURS_PER_REPORT,
            message = "must be between 1 and 24"
        )
    )]
    pub hours: Option<i32>,
    #[validate(length(max = MAX_NAME_LENGTH, message = "is too long (maximum is 255 characters)"))]
    pub name: Option<String>,
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH,
        message = "is too long (maximum is 10000 characters)"
    ))]
    pub description: Option<String>,
}

/// Attribute changes for update, approve, and reject.
///
/// Absent keys leave the stored value alone. `name` and `description` also
/// accept an explicit `null`, which clears them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHourReport {
    pub task_id: Option<DbId>,
    pub date: Option<Date>,
    #[validate(range(
        min = MIN_HOURS_PER_REPORT,
        max = MAX_HOURS_PER_REPORT,
        message = "must be between 1 and 24"
    ))]
    pub hours: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = MAX_NAME_LENGTH, message = "is too long (maximum is 255 characters)"))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH,
        message = "is too long (maximum is 10000 characters)"
    ))]
    pub description: Option<Option<String>>,
}

/// Marks a key that appeared in the body, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A fully-resolved row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHourReport {
    pub user_id: DbId,
    pub task_id: DbId,
    pub date: Date,
    pub hours: i32,
    pub cost: f64,
    pub state: ReportState,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Changes applied to a stored report. `None` fields keep their stored value;
/// `Some(None)` clears `name` or `description`. `cost` and `state` are always
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct HourReportChanges {
    pub task_id: Option<DbId>,
    pub date: Option<Date>,
    pub hours: Option<i32>,
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub cost: f64,
    pub state: ReportState,
}

/// Which of the actor's reports a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFilter {
    /// Reports still needing attention: pending or rejected.
    #[default]
    Open,
    Pending,
    Rejected,
    All,
}

impl ReportFilter {
    /// Resolve the listing flags. `all` wins over `pending`, which wins over
    /// `rejected`.
    pub fn from_flags(all: bool, pending: bool, rejected: bool) -> Self {
        if all {
            ReportFilter::All
        } else if pending {
            ReportFilter::Pending
        } else if rejected {
            ReportFilter::Rejected
        } else {
            ReportFilter::Open
        }
    }

    /// States a report must be in to be listed, or `None` for no constraint.
    pub fn states(self) -> Option<&'static [ReportState]> {
        match self {
            ReportFilter::Open => Some(&[ReportState::Pending, ReportState::Rejected]),
            ReportFilter::Pending => Some(&[ReportState::Pending]),
            ReportFilter::Rejected => Some(&[ReportState::Rejected]),
            ReportFilter::All => None,
        }
    }

    pub fn matches(self, state: ReportState) -> bool {
        match self.states() {
            Some(states) => states.contains(&state),
            None => true,
        }
    }
}

/// A task an actor may log hours against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: DbId,
    pub project_id: DbId,
    pub name: Option<String>,
    pub project_name: String,
}

/// Default task for a new report: the first task of the actor's most
/// recently created project.
pub fn default_task(tasks: &[TaskSummary]) -> Option<&TaskSummary> {
    let last_project = tasks.iter().map(|t| t.project_id).max()?;
    tasks
        .iter()
        .filter(|t| t.project_id == last_project)
        .min_by_key(|t| t.id)
}

/// Unsaved report template handed out before creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourReportDraft {
    pub user_id: DbId,
    pub task_id: Option<DbId>,
    pub state: ReportState,
}

/// Payload for the "new report" form.
#[derive(Debug, Clone, Serialize)]
pub struct NewReportForm {
    pub report: HourReportDraft,
    pub available_tasks: Vec<TaskSummary>,
}

/// Payload for the "edit report" form.
#[derive(Debug, Clone, Serialize)]
pub struct EditReportForm {
    pub report: HourReport,
    pub available_tasks: Vec<TaskSummary>,
}
