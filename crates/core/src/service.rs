//! The hour-report service and the collaborators it depends on.
//!
//! [`HourReportService`] owns the workflow rules: who a report belongs to,
//! which state a write leaves it in, how its cost is derived, and the order
//! in which lookups, validation, and permission checks happen. Persistence,
//! permission data, and task lookup are reached through the traits below so
//! the rules can be exercised without a database.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::authorization::{Actor, Permission, ReportSubject};
use crate::error::CoreError;
use crate::hour_report::{
    default_task, CreateHourReport, EditReportForm, HourReportChanges, HourReportDraft,
    NewHourReport, NewReportForm, ReportFilter, TaskSummary, UpdateHourReport,
};
use crate::project_cost::{compute_cost, HourReport, ReportState, Transition};
use crate::types::DbId;

const ENTITY: &str = "HourReport";

/* --------------------------------------------------------------------------
Collaborators
-------------------------------------------------------------------------- */

/// Persistence for hour reports.
#[async_trait]
pub trait HourReportStore: Send + Sync {
    /// Find an hour report by id. Rows of other cost kinds are `None`.
    async fn find(&self, id: DbId) -> Result<Option<HourReport>, CoreError>;

    /// Reports owned by `owner_id` matching `filter`, newest date first.
    async fn list_for_owner(
        &self,
        owner_id: DbId,
        filter: ReportFilter,
    ) -> Result<Vec<HourReport>, CoreError>;

    async fn insert(&self, report: &NewHourReport) -> Result<HourReport, CoreError>;

    /// Apply `changes`. Returns `None` if no hour report with `id` exists.
    async fn update(
        &self,
        id: DbId,
        changes: &HourReportChanges,
    ) -> Result<Option<HourReport>, CoreError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    async fn hourly_rate(&self, user_id: DbId) -> Result<Option<f64>, CoreError>;
}

/// Decides whether an actor may perform an operation on a report.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Succeeds silently or fails with [`CoreError::Forbidden`].
    async fn enforce(
        &self,
        actor: &Actor,
        permission: Permission,
        subject: &ReportSubject,
    ) -> Result<(), CoreError>;
}

/// Read-only lookup of the tasks an actor may book hours against.
#[async_trait]
pub trait TaskCatalog: Send + Sync {
    async fn available_tasks(&self, actor: &Actor) -> Result<Vec<TaskSummary>, CoreError>;
}

/* --------------------------------------------------------------------------
Service
-------------------------------------------------------------------------- */

/// Permission a transition requires on the existing report.
fn required_permission(transition: Transition) -> Permission {
    match transition {
        Transition::Reopen => Permission::Update,
        Transition::Approve => Permission::Approve,
        Transition::Reject => Permission::Reject,
    }
}

/// Hour-report operations on behalf of an explicit actor.
#[derive(Clone)]
pub struct HourReportService {
    store: Arc<dyn HourReportStore>,
    gate: Arc<dyn AuthorizationGate>,
    tasks: Arc<dyn TaskCatalog>,
}

impl HourReportService {
    pub fn new(
        store: Arc<dyn HourReportStore>,
        gate: Arc<dyn AuthorizationGate>,
        tasks: Arc<dyn TaskCatalog>,
    ) -> Self {
        Self { store, gate, tasks }
    }

    /// The actor's own reports matching `filter`, newest date first.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: ReportFilter,
    ) -> Result<Vec<HourReport>, CoreError> {
        self.store.list_for_owner(actor.user_id, filter).await
    }

    /// Every report the actor owns, regardless of state.
    pub async fn list_all(&self, actor: &Actor) -> Result<Vec<HourReport>, CoreError> {
        self.list(actor, ReportFilter::All).await
    }

    pub async fn get(&self, actor: &Actor, id: DbId) -> Result<HourReport, CoreError> {
        let report = self.find(id).await?;
        self.gate
            .enforce(actor, Permission::View, &ReportSubject::from(&report))
            .await?;
        Ok(report)
    }

    pub async fn available_tasks(&self, actor: &Actor) -> Result<Vec<TaskSummary>, CoreError> {
        self.tasks.available_tasks(actor).await
    }

    /// Unsaved template for a new report, with the actor's default task.
    pub async fn new_draft(&self, actor: &Actor) -> Result<NewReportForm, CoreError> {
        let available_tasks = self.available_tasks(actor).await?;
        let report = HourReportDraft {
            user_id: actor.user_id,
            task_id: default_task(&available_tasks).map(|task| task.id),
            state: ReportState::Pending,
        };
        Ok(NewReportForm {
            report,
            available_tasks,
        })
    }

    /// A report the actor may edit, with the tasks it could be moved to.
    pub async fn edit_form(&self, actor: &Actor, id: DbId) -> Result<EditReportForm, CoreError> {
        let report = self.find(id).await?;
        self.gate
            .enforce(actor, Permission::Update, &ReportSubject::from(&report))
            .await?;
        let available_tasks = self.available_tasks(actor).await?;
        Ok(EditReportForm {
            report,
            available_tasks,
        })
    }

    /// Create a pending report owned by the actor.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateHourReport,
    ) -> Result<HourReport, CoreError> {
        input.validate()?;
        let (Some(task_id), Some(date), Some(hours)) = (input.task_id, input.date, input.hours)
        else {
            return Err(CoreError::Internal(
                "validated hour report is missing required attributes".to_string(),
            ));
        };

        let subject = ReportSubject {
            owner_id: actor.user_id,
            task_id,
        };
        self.gate.enforce(actor, Permission::Create, &subject).await?;

        let rate = self.store.hourly_rate(actor.user_id).await?;
        let report = NewHourReport {
            user_id: actor.user_id,
            task_id,
            date,
            hours,
            cost: compute_cost(hours, rate),
            state: ReportState::Pending,
            name: input.name,
            description: input.description,
        };
        self.store.insert(&report).await
    }

    /// Edit a report. Any edit reopens it for review.
    pub async fn update(
        &self,
        actor: &Actor,
        id: DbId,
        input: UpdateHourReport,
    ) -> Result<HourReport, CoreError> {
        self.apply(actor, id, Transition::Reopen, input).await
    }

    pub async fn approve(
        &self,
        actor: &Actor,
        id: DbId,
        input: UpdateHourReport,
    ) -> Result<HourReport, CoreError> {
        self.apply(actor, id, Transition::Approve, input).await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        id: DbId,
        input: UpdateHourReport,
    ) -> Result<HourReport, CoreError> {
        self.apply(actor, id, Transition::Reject, input).await
    }

    /// Delete a report. Permission is checked before anything is removed.
    pub async fn destroy(&self, actor: &Actor, id: DbId) -> Result<(), CoreError> {
        let report = self.find(id).await?;
        self.gate
            .enforce(actor, Permission::Destroy, &ReportSubject::from(&report))
            .await?;
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: ENTITY, id })
        }
    }

    async fn find(&self, id: DbId) -> Result<HourReport, CoreError> {
        self.store
            .find(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Shared path for every write to an existing report.
    ///
    /// Order: lookup, attribute validation, permission on the report as
    /// stored, permission on the target task when the report moves, then
    /// the write with the transition's target state and a recomputed cost.
    async fn apply(
        &self,
        actor: &Actor,
        id: DbId,
        transition: Transition,
        input: UpdateHourReport,
    ) -> Result<HourReport, CoreError> {
        let report = self.find(id).await?;
        input.validate()?;

        self.gate
            .enforce(
                actor,
                required_permission(transition),
                &ReportSubject::from(&report),
            )
            .await?;

        if let Some(task_id) = input.task_id.filter(|task_id| *task_id != report.task_id) {
            let moved = ReportSubject {
                owner_id: report.user_id,
                task_id,
            };
            self.gate.enforce(actor, Permission::Create, &moved).await?;
        }

        let hours = input.hours.unwrap_or(report.hours);
        let rate = self.store.hourly_rate(report.user_id).await?;
        let changes = HourReportChanges {
            task_id: input.task_id,
            date: input.date,
            hours: input.hours,
            name: input.name,
            description: input.description,
            cost: compute_cost(hours, rate),
            state: transition.target(),
        };

        self.store
            .update(id, &changes)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }
}
