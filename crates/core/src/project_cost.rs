//! Cost records sharing the `project_costs` table.
//!
//! The table holds a closed set of record kinds distinguished by its `type`
//! column. Rows decode into [`ProjectCost`], a tagged variant over the kinds;
//! hour-report operations only ever see the [`ProjectCost::HourReport`] arm.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};

/// State id type matching the SMALLINT `project_costs.state` column.
pub type StateId = i16;

/* --------------------------------------------------------------------------
Record kinds
-------------------------------------------------------------------------- */

/// Discriminator values stored in `project_costs.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostKind {
    HourReport,
    Expense,
}

impl CostKind {
    pub const ALL: [CostKind; 2] = [CostKind::HourReport, CostKind::Expense];

    /// The discriminator string as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            CostKind::HourReport => "HourReport",
            CostKind::Expense => "Expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/* --------------------------------------------------------------------------
Approval state
-------------------------------------------------------------------------- */

/// Approval state of an hour report.
///
/// Discriminants match the values stored in `project_costs.state`.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportState {
    Pending = 1,
    Approved = 2,
    Rejected = 3,
}

impl ReportState {
    /// Return the database state ID.
    pub fn id(self) -> StateId {
        self as StateId
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportState::Pending => "pending",
            ReportState::Approved => "approved",
            ReportState::Rejected => "rejected",
        }
    }
}

impl From<ReportState> for StateId {
    fn from(value: ReportState) -> Self {
        value as StateId
    }
}

impl TryFrom<StateId> for ReportState {
    type Error = CoreError;

    fn try_from(value: StateId) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReportState::Pending),
            2 => Ok(ReportState::Approved),
            3 => Ok(ReportState::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown hour report state id {other}"
            ))),
        }
    }
}

/// A write to an existing hour report and the state it leaves the report in.
///
/// Every update goes through exactly one transition. Plain edits reopen the
/// report for review regardless of its prior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Edit by the owner or a manager; back to `Pending`.
    Reopen,
    Approve,
    Reject,
}

impl Transition {
    pub fn target(self) -> ReportState {
        match self {
            Transition::Reopen => ReportState::Pending,
            Transition::Approve => ReportState::Approved,
            Transition::Reject => ReportState::Rejected,
        }
    }
}

/* --------------------------------------------------------------------------
Records
-------------------------------------------------------------------------- */

/// Hours logged by a user against a task, subject to approval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourReport {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: DbId,
    pub date: Date,
    pub hours: i32,
    pub cost: f64,
    pub state: ReportState,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A non-hour cost booked against a task. Stored alongside hour reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: Option<DbId>,
    pub date: Option<Date>,
    pub cost: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Any row of `project_costs`, tagged by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectCost {
    HourReport(HourReport),
    Expense(Expense),
}

impl ProjectCost {
    pub fn kind(&self) -> CostKind {
        match self {
            ProjectCost::HourReport(_) => CostKind::HourReport,
            ProjectCost::Expense(_) => CostKind::Expense,
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            ProjectCost::HourReport(report) => report.id,
            ProjectCost::Expense(expense) => expense.id,
        }
    }

    pub fn into_hour_report(self) -> Option<HourReport> {
        match self {
            ProjectCost::HourReport(report) => Some(report),
            ProjectCost::Expense(_) => None,
        }
    }
}

/// Monetary value of `hours` at the owner's hourly rate. No rate means no cost.
pub fn compute_cost(hours: i32, hourly_rate: Option<f64>) -> f64 {
    f64::from(hours) * hourly_rate.unwrap_or(0.0)
}
