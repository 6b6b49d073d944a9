use async_trait::async_trait;
use sqlx::PgPool;

use super::AuditLog;
use crate::core::error::{AppError, Result};

/// Writes audit messages to the platform `log` table
pub struct PgAuditLog {
    pool: PgPool,
    module: String,
}

impl PgAuditLog {
    pub fn new(pool: PgPool, module: impl Into<String>) -> Self {
        Self {
            pool,
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn log(&self, message: &str, actor: Option<&str>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO log (module, text, act)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&self.module)
        .bind(message)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        tracing::info!(module = %self.module, actor = ?actor, "{}", message);

        Ok(())
    }
}
