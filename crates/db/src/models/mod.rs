//! Row models for the tables the hour-report workflow reads and writes.

pub mod project;
pub mod project_cost;
pub mod task;
