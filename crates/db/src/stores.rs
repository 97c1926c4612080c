//! PostgreSQL implementations of the hour-report service collaborators.

use async_trait::async_trait;
use hourbook_core::authorization::{enforce, Actor, Permission, ProjectAccess, ReportSubject};
use hourbook_core::error::CoreError;
use hourbook_core::hour_report::{HourReportChanges, NewHourReport, ReportFilter, TaskSummary};
use hourbook_core::project_cost::{HourReport, ProjectCost};
use hourbook_core::service::{AuthorizationGate, HourReportStore, TaskCatalog};
use hourbook_core::types::DbId;
use hourbook_core::validation::unknown_reference;
use sqlx::PgPool;

use crate::models::project_cost::ProjectCostRow;
use crate::repositories::{HourReportRepo, ProjectRepo, TaskRepo, UserRepo};

/// Foreign key from `project_costs.task_id` to `tasks.id`.
const TASK_FOREIGN_KEY: &str = "project_costs_task_id_fkey";

/// Convert a sqlx error into a domain error.
///
/// A task foreign-key violation (the task vanished between the permission
/// check and the write) becomes a `task_id` field error; everything else is
/// internal.
pub fn into_core_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL foreign key violation: error code 23503
        if db_err.code().as_deref() == Some("23503")
            && db_err.constraint() == Some(TASK_FOREIGN_KEY)
        {
            return unknown_reference("task_id");
        }
    }
    CoreError::Internal(format!("Database error: {err}"))
}

fn into_hour_report(row: ProjectCostRow) -> Result<Option<HourReport>, CoreError> {
    Ok(ProjectCost::try_from(row)?.into_hour_report())
}

fn expect_hour_report(row: ProjectCostRow) -> Result<HourReport, CoreError> {
    let id = row.id;
    into_hour_report(row)?
        .ok_or_else(|| CoreError::Internal(format!("Row {id} is not an hour report")))
}

/* --------------------------------------------------------------------------
Record store
-------------------------------------------------------------------------- */

#[derive(Clone)]
pub struct PgHourReportStore {
    pool: PgPool,
}

impl PgHourReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HourReportStore for PgHourReportStore {
    async fn find(&self, id: DbId) -> Result<Option<HourReport>, CoreError> {
        match HourReportRepo::find_by_id(&self.pool, id)
            .await
            .map_err(into_core_error)?
        {
            Some(row) => into_hour_report(row),
            None => Ok(None),
        }
    }

    async fn list_for_owner(
        &self,
        owner_id: DbId,
        filter: ReportFilter,
    ) -> Result<Vec<HourReport>, CoreError> {
        HourReportRepo::list_for_owner(&self.pool, owner_id, filter.states())
            .await
            .map_err(into_core_error)?
            .into_iter()
            .map(expect_hour_report)
            .collect()
    }

    async fn insert(&self, report: &NewHourReport) -> Result<HourReport, CoreError> {
        let row = HourReportRepo::create(&self.pool, report)
            .await
            .map_err(into_core_error)?;
        expect_hour_report(row)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &HourReportChanges,
    ) -> Result<Option<HourReport>, CoreError> {
        match HourReportRepo::update(&self.pool, id, changes)
            .await
            .map_err(into_core_error)?
        {
            Some(row) => expect_hour_report(row).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        HourReportRepo::delete(&self.pool, id)
            .await
            .map_err(into_core_error)
    }

    async fn hourly_rate(&self, user_id: DbId) -> Result<Option<f64>, CoreError> {
        UserRepo::hourly_rate(&self.pool, user_id)
            .await
            .map_err(into_core_error)
    }
}

/* --------------------------------------------------------------------------
Authorization gate
-------------------------------------------------------------------------- */

/// Resolves project access for the subject's task and applies the policy in
/// `hourbook_core::authorization`.
#[derive(Clone)]
pub struct PgAuthorizationGate {
    pool: PgPool,
}

impl PgAuthorizationGate {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationGate for PgAuthorizationGate {
    async fn enforce(
        &self,
        actor: &Actor,
        permission: Permission,
        subject: &ReportSubject,
    ) -> Result<(), CoreError> {
        let access: Option<ProjectAccess> =
            ProjectRepo::access_for_task(&self.pool, subject.task_id, subject.owner_id)
                .await
                .map_err(into_core_error)?
                .map(ProjectAccess::from);

        let decision = enforce(actor, permission, subject, access.as_ref());
        if decision.is_err() {
            tracing::debug!(
                user_id = actor.user_id,
                permission = permission.as_str(),
                owner_id = subject.owner_id,
                task_id = subject.task_id,
                "Hour report permission denied"
            );
        }
        decision
    }
}

/* --------------------------------------------------------------------------
Task catalog
-------------------------------------------------------------------------- */

#[derive(Clone)]
pub struct PgTaskCatalog {
    pool: PgPool,
}

impl PgTaskCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskCatalog for PgTaskCatalog {
    async fn available_tasks(&self, actor: &Actor) -> Result<Vec<TaskSummary>, CoreError> {
        let rows = TaskRepo::list_for_member(&self.pool, actor.user_id)
            .await
            .map_err(into_core_error)?;
        Ok(rows.into_iter().map(TaskSummary::from).collect())
    }
}
