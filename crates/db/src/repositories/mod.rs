//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod hour_report_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use hour_report_repo::HourReportRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
