//! Repository for the `tasks` table.

use hourbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::TaskSummaryRow;

pub struct TaskRepo;

impl TaskRepo {
    /// Tasks of every project the user is a member of, grouped by project
    /// in creation order.
    pub async fn list_for_member(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskSummaryRow>(
            "SELECT t.id, t.project_id, t.name, p.name AS project_name
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             JOIN projects_users pu ON pu.project_id = p.id
             WHERE pu.user_id = $1
             ORDER BY p.id, t.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
