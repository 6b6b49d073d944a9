use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::borrow::Cow;
use std::time::Duration;

/// PostgreSQL error code for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Convert a write-path database error into a more specific AppError.
///
/// Foreign key violations are reported through `on_fk_violation`, since only
/// the caller knows which reference was involved.
pub fn map_write_error(e: sqlx::Error, on_fk_violation: impl FnOnce() -> AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(Cow::Borrowed(FOREIGN_KEY_VIOLATION)) {
            return on_fk_violation();
        }
    }

    tracing::error!("Database write failed: {:?}", e);
    AppError::Database(e)
}
