//! Row model for the `project_costs` table.

use hourbook_core::error::CoreError;
use hourbook_core::project_cost::{CostKind, Expense, HourReport, ProjectCost, ReportState, StateId};
use hourbook_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// A raw row from `project_costs`, before the discriminator is resolved.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectCostRow {
    pub id: DbId,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: DbId,
    pub task_id: Option<DbId>,
    pub date: Option<Date>,
    pub hours: Option<i32>,
    pub cost: Option<f64>,
    pub state: Option<StateId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ProjectCostRow> for ProjectCost {
    type Error = CoreError;

    fn try_from(row: ProjectCostRow) -> Result<Self, Self::Error> {
        let kind = CostKind::parse(&row.kind).ok_or_else(|| {
            CoreError::Internal(format!(
                "Unknown project cost type '{}' on row {}",
                row.kind, row.id
            ))
        })?;

        match kind {
            CostKind::HourReport => {
                let (Some(task_id), Some(date), Some(hours), Some(state)) =
                    (row.task_id, row.date, row.hours, row.state)
                else {
                    return Err(CoreError::Internal(format!(
                        "Hour report row {} is missing required columns",
                        row.id
                    )));
                };
                Ok(ProjectCost::HourReport(HourReport {
                    id: row.id,
                    user_id: row.user_id,
                    task_id,
                    date,
                    hours,
                    cost: row.cost.unwrap_or(0.0),
                    state: ReportState::try_from(state)?,
                    name: row.name,
                    description: row.description,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }))
            }
            CostKind::Expense => Ok(ProjectCost::Expense(Expense {
                id: row.id,
                user_id: row.user_id,
                task_id: row.task_id,
                date: row.date,
                cost: row.cost,
                name: row.name,
                description: row.description,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })),
        }
    }
}
