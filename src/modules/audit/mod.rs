//! Audit trail of bill-board mutations.
//!
//! The platform log only takes a free-text message per event, optionally
//! attributed to the acting account.

mod pg_audit_log;

use async_trait::async_trait;

use crate::core::error::Result;

pub use pg_audit_log::PgAuditLog;

#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Write one message to the log
    async fn log(&self, message: &str, actor: Option<&str>) -> Result<()>;

    /// Write a message after the mutation it describes has been committed.
    ///
    /// Failures are reported through tracing only; the mutation stands.
    async fn record(&self, message: &str, actor: Option<&str>) {
        if let Err(e) = self.log(message, actor).await {
            tracing::error!(
                "Failed to write audit log entry '{}' (actor={:?}): {}",
                message,
                actor,
                e
            );
        }
    }
}
