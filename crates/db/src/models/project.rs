//! Project access rows used for permission decisions.

use hourbook_core::authorization::ProjectAccess;
use hourbook_core::types::DbId;
use sqlx::FromRow;

/// The manager of the project owning a task, and whether a given user is a member.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectAccessRow {
    pub manager_id: Option<DbId>,
    pub owner_is_member: bool,
}

impl From<ProjectAccessRow> for ProjectAccess {
    fn from(row: ProjectAccessRow) -> Self {
        Self {
            manager_id: row.manager_id,
            owner_is_member: row.owner_is_member,
        }
    }
}
