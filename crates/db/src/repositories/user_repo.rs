//! Repository for the `users` table.

use hourbook_core::types::DbId;
use sqlx::PgPool;

/// Read access to user attributes the hour-report workflow needs.
pub struct UserRepo;

impl UserRepo {
    /// The user's hourly rate. `None` if the user is unknown or has no rate.
    pub async fn hourly_rate(pool: &PgPool, user_id: DbId) -> Result<Option<f64>, sqlx::Error> {
        let rate: Option<Option<f64>> =
            sqlx::query_scalar("SELECT hourly_rate FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(rate.flatten())
    }
}
