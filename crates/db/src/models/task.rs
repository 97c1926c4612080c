//! Task rows joined with their project.

use hourbook_core::hour_report::TaskSummary;
use hourbook_core::types::DbId;
use sqlx::FromRow;

/// A task together with the name of the project it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct TaskSummaryRow {
    pub id: DbId,
    pub project_id: DbId,
    pub name: Option<String>,
    pub project_name: String,
}

impl From<TaskSummaryRow> for TaskSummary {
    fn from(row: TaskSummaryRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            project_name: row.project_name,
        }
    }
}
