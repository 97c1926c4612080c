//! Repository for hour reports in the `project_costs` table.

use hourbook_core::hour_report::{HourReportChanges, NewHourReport};
use hourbook_core::project_cost::{CostKind, ReportState, StateId};
use hourbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_cost::ProjectCostRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, \"type\", name, description, user_id, task_id, date, hours, cost, \
                       state, created_at, updated_at";

/// Provides CRUD operations for hour reports.
///
/// Reads by id return the row whatever its kind so the caller decides how
/// to treat other cost records; every other query is restricted to
/// `HourReport` rows.
pub struct HourReportRepo;

impl HourReportRepo {
    /// Insert a new hour report, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewHourReport) -> Result<ProjectCostRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_costs
                (\"type\", name, description, user_id, task_id, date, hours, cost, state)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCostRow>(&query)
            .bind(CostKind::HourReport.as_str())
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.user_id)
            .bind(input.task_id)
            .bind(input.date)
            .bind(input.hours)
            .bind(input.cost)
            .bind(input.state.id())
            .fetch_one(pool)
            .await
    }

    /// Find a cost row of any kind by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectCostRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_costs WHERE id = $1");
        sqlx::query_as::<_, ProjectCostRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's hour reports, newest date first.
    ///
    /// `states` of `None` lists every state.
    pub async fn list_for_owner(
        pool: &PgPool,
        user_id: DbId,
        states: Option<&[ReportState]>,
    ) -> Result<Vec<ProjectCostRow>, sqlx::Error> {
        let state_ids: Option<Vec<StateId>> =
            states.map(|states| states.iter().map(|s| s.id()).collect());
        let query = format!(
            "SELECT {COLUMNS} FROM project_costs
             WHERE \"type\" = $1
               AND user_id = $2
               AND ($3::SMALLINT[] IS NULL OR state = ANY($3))
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectCostRow>(&query)
            .bind(CostKind::HourReport.as_str())
            .bind(user_id)
            .bind(state_ids)
            .fetch_all(pool)
            .await
    }

    /// Update an hour report. `None` attributes keep their stored value and
    /// `Some(None)` clears `name` or `description`; cost and state are
    /// always written.
    ///
    /// Returns `None` if no hour report with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &HourReportChanges,
    ) -> Result<Option<ProjectCostRow>, sqlx::Error> {
        let query = format!(
            "UPDATE project_costs SET
                task_id = COALESCE($3, task_id),
                date = COALESCE($4, date),
                hours = COALESCE($5, hours),
                name = CASE WHEN $6 THEN $7 ELSE name END,
                description = CASE WHEN $8 THEN $9 ELSE description END,
                cost = $10,
                state = $11,
                updated_at = NOW()
             WHERE id = $1 AND \"type\" = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCostRow>(&query)
            .bind(id)
            .bind(CostKind::HourReport.as_str())
            .bind(input.task_id)
            .bind(input.date)
            .bind(input.hours)
            .bind(input.name.is_some())
            .bind(input.name.clone().flatten())
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.cost)
            .bind(input.state.id())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an hour report. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_costs WHERE id = $1 AND \"type\" = $2")
            .bind(id)
            .bind(CostKind::HourReport.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
