//! Well-known role name constants.
//!
//! These must match the `users.role` values written by
//! `20261017000001_create_users_table.sql`.

/// Full access to every project and report.
pub const ROLE_ADMIN: &str = "admin";

/// Default role; access is derived from project membership.
pub const ROLE_EMPLOYEE: &str = "employee";
