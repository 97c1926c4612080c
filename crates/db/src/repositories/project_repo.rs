//! Repository for the `projects` and `projects_users` tables.

use hourbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::ProjectAccessRow;

pub struct ProjectRepo;

impl ProjectRepo {
    /// Resolve the manager of the project owning `task_id` and whether
    /// `member_id` belongs to it. Returns `None` if the task does not exist.
    pub async fn access_for_task(
        pool: &PgPool,
        task_id: DbId,
        member_id: DbId,
    ) -> Result<Option<ProjectAccessRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectAccessRow>(
            "SELECT p.user_id AS manager_id,
                    EXISTS (
                        SELECT 1 FROM projects_users pu
                        WHERE pu.project_id = p.id AND pu.user_id = $2
                    ) AS owner_is_member
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1",
        )
        .bind(task_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await
    }
}
