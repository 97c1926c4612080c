//! In-memory collaborators for service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::authorization::{enforce, Actor, Permission, ProjectAccess, ReportSubject};
use crate::error::CoreError;
use crate::hour_report::{HourReportChanges, NewHourReport, ReportFilter, TaskSummary};
use crate::project_cost::{Expense, HourReport, ProjectCost};
use crate::service::{AuthorizationGate, HourReportStore, TaskCatalog};
use crate::types::DbId;

#[derive(Default)]
pub struct MemoryStore {
    costs: Mutex<BTreeMap<DbId, ProjectCost>>,
    rates: Mutex<HashMap<DbId, f64>>,
}

impl MemoryStore {
    pub fn set_rate(&self, user_id: DbId, rate: f64) {
        self.rates.lock().unwrap().insert(user_id, rate);
    }

    pub fn len(&self) -> usize {
        self.costs.lock().unwrap().len()
    }

    pub fn get(&self, id: DbId) -> Option<HourReport> {
        self.costs
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .and_then(ProjectCost::into_hour_report)
    }

    /// Store an expense row next to the hour reports and return its id.
    pub fn insert_expense(&self, user_id: DbId) -> DbId {
        let mut costs = self.costs.lock().unwrap();
        let id = next_id(&costs);
        costs.insert(
            id,
            ProjectCost::Expense(Expense {
                id,
                user_id,
                task_id: None,
                date: None,
                cost: Some(20.0),
                name: Some("Taxi".into()),
                description: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
        );
        id
    }
}

fn next_id(costs: &BTreeMap<DbId, ProjectCost>) -> DbId {
    costs.keys().next_back().copied().unwrap_or(0) + 1
}

#[async_trait]
impl HourReportStore for MemoryStore {
    async fn find(&self, id: DbId) -> Result<Option<HourReport>, CoreError> {
        Ok(self.get(id))
    }

    async fn list_for_owner(
        &self,
        owner_id: DbId,
        filter: ReportFilter,
    ) -> Result<Vec<HourReport>, CoreError> {
        let costs = self.costs.lock().unwrap();
        let mut reports: Vec<HourReport> = costs
            .values()
            .cloned()
            .filter_map(ProjectCost::into_hour_report)
            .filter(|r| r.user_id == owner_id && filter.matches(r.state))
            .collect();
        reports.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn insert(&self, report: &NewHourReport) -> Result<HourReport, CoreError> {
        let mut costs = self.costs.lock().unwrap();
        let id = next_id(&costs);
        let now = Utc::now();
        let stored = HourReport {
            id,
            user_id: report.user_id,
            task_id: report.task_id,
            date: report.date,
            hours: report.hours,
            cost: report.cost,
            state: report.state,
            name: report.name.clone(),
            description: report.description.clone(),
            created_at: now,
            updated_at: now,
        };
        costs.insert(id, ProjectCost::HourReport(stored.clone()));
        Ok(stored)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &HourReportChanges,
    ) -> Result<Option<HourReport>, CoreError> {
        let mut costs = self.costs.lock().unwrap();
        let Some(ProjectCost::HourReport(report)) = costs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(task_id) = changes.task_id {
            report.task_id = task_id;
        }
        if let Some(date) = changes.date {
            report.date = date;
        }
        if let Some(hours) = changes.hours {
            report.hours = hours;
        }
        if let Some(name) = &changes.name {
            report.name = name.clone();
        }
        if let Some(description) = &changes.description {
            report.description = description.clone();
        }
        report.cost = changes.cost;
        report.state = changes.state;
        report.updated_at = Utc::now();
        Ok(Some(report.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut costs = self.costs.lock().unwrap();
        match costs.get(&id) {
            Some(ProjectCost::HourReport(_)) => Ok(costs.remove(&id).is_some()),
            _ => Ok(false),
        }
    }

    async fn hourly_rate(&self, user_id: DbId) -> Result<Option<f64>, CoreError> {
        Ok(self.rates.lock().unwrap().get(&user_id).copied())
    }
}

struct Project {
    name: String,
    manager_id: Option<DbId>,
    members: Vec<DbId>,
}

/// Projects, memberships, and tasks; acts as both gate and task catalog.
#[derive(Default)]
pub struct MemoryDirectory {
    projects: Mutex<BTreeMap<DbId, Project>>,
    tasks: Mutex<BTreeMap<DbId, (DbId, String)>>,
}

impl MemoryDirectory {
    pub fn add_project(&self, id: DbId, name: &str, manager_id: Option<DbId>, members: &[DbId]) {
        self.projects.lock().unwrap().insert(
            id,
            Project {
                name: name.to_string(),
                manager_id,
                members: members.to_vec(),
            },
        );
    }

    pub fn add_task(&self, id: DbId, project_id: DbId, name: &str) {
        self.tasks
            .lock()
            .unwrap()
            .insert(id, (project_id, name.to_string()));
    }

    fn access(&self, subject: &ReportSubject) -> Option<ProjectAccess> {
        let tasks = self.tasks.lock().unwrap();
        let (project_id, _) = tasks.get(&subject.task_id)?;
        let projects = self.projects.lock().unwrap();
        let project = projects.get(project_id)?;
        Some(ProjectAccess {
            manager_id: project.manager_id,
            owner_is_member: project.members.contains(&subject.owner_id),
        })
    }
}

#[async_trait]
impl AuthorizationGate for MemoryDirectory {
    async fn enforce(
        &self,
        actor: &Actor,
        permission: Permission,
        subject: &ReportSubject,
    ) -> Result<(), CoreError> {
        let access = self.access(subject);
        enforce(actor, permission, subject, access.as_ref())
    }
}

#[async_trait]
impl TaskCatalog for MemoryDirectory {
    async fn available_tasks(&self, actor: &Actor) -> Result<Vec<TaskSummary>, CoreError> {
        let projects = self.projects.lock().unwrap();
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .filter_map(|(id, (project_id, name))| {
                let project = projects.get(project_id)?;
                project
                    .members
                    .contains(&actor.user_id)
                    .then(|| TaskSummary {
                        id: *id,
                        project_id: *project_id,
                        name: Some(name.clone()),
                        project_name: project.name.clone(),
                    })
            })
            .collect())
    }
}
