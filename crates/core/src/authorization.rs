//! Permission policy for hour reports.
//!
//! Access is derived from the project that owns a report's task: the
//! project's managing user has elevated rights over every report booked
//! against it, members may book their own hours, and admins may do
//! anything. Gate implementations resolve a [`ProjectAccess`] and call
//! [`enforce`].

use crate::error::CoreError;
use crate::project_cost::HourReport;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;
use crate::validation::unknown_reference;

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Operations a gate can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    View,
    Create,
    Update,
    Destroy,
    Approve,
    Reject,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Create => "create",
            Permission::Update => "update",
            Permission::Destroy => "destroy",
            Permission::Approve => "approve",
            Permission::Reject => "reject",
        }
    }
}

/// The parts of a report a permission decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSubject {
    pub owner_id: DbId,
    pub task_id: DbId,
}

impl From<&HourReport> for ReportSubject {
    fn from(report: &HourReport) -> Self {
        Self {
            owner_id: report.user_id,
            task_id: report.task_id,
        }
    }
}

/// Relationship between a report and the project owning its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAccess {
    /// The project's managing user, if any.
    pub manager_id: Option<DbId>,
    /// Whether the report's owner is a member of the project.
    pub owner_is_member: bool,
}

/// Decide whether `actor` may perform `permission` on `subject`.
pub fn permits(
    actor: &Actor,
    permission: Permission,
    subject: &ReportSubject,
    access: &ProjectAccess,
) -> bool {
    if actor.is_admin() {
        return true;
    }

    let is_owner = actor.user_id == subject.owner_id;
    let is_manager = access.manager_id == Some(actor.user_id);

    match permission {
        Permission::View | Permission::Update | Permission::Destroy => is_owner || is_manager,
        Permission::Create => {
            let owner_belongs =
                access.owner_is_member || access.manager_id == Some(subject.owner_id);
            (is_owner || is_manager) && owner_belongs
        }
        Permission::Approve | Permission::Reject => is_manager,
    }
}

/// Apply [`permits`] to a resolved access record.
///
/// `access` is `None` when the subject's task does not exist, which is
/// reported against the `task_id` field rather than as a permission failure.
pub fn enforce(
    actor: &Actor,
    permission: Permission,
    subject: &ReportSubject,
    access: Option<&ProjectAccess>,
) -> Result<(), CoreError> {
    let access = access.ok_or_else(|| unknown_reference("task_id"))?;
    if permits(actor, permission, subject, access) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Not allowed to {} this hour report",
            permission.as_str()
        )))
    }
}
