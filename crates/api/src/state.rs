use std::sync::Arc;

use hourbook_core::service::HourReportService;
use hourbook_db::stores::{PgAuthorizationGate, PgHourReportStore, PgTaskCatalog};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hourbook_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Hour-report use cases backed by PostgreSQL.
    pub hour_reports: Arc<HourReportService>,
}

impl AppState {
    /// Wire the PostgreSQL collaborators into the hour-report service.
    pub fn new(pool: hourbook_db::DbPool, config: ServerConfig) -> Self {
        let hour_reports = HourReportService::new(
            Arc::new(PgHourReportStore::new(pool.clone())),
            Arc::new(PgAuthorizationGate::new(pool.clone())),
            Arc::new(PgTaskCatalog::new(pool.clone())),
        );
        Self {
            pool,
            config: Arc::new(config),
            hour_reports: Arc::new(hour_reports),
        }
    }
}
