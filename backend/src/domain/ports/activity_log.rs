//! Append-only audit log port.
use async_trait::async_trait;
use tracing::info;

use crate::domain::ActivityRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity log adapters.
    pub enum ActivityLogError {
        /// Log store could not be reached.
        Connection { message: String } => "activity log connection failed: {message}",
        /// Append was rejected by the store.
        Write { message: String } => "activity log write failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Append one record. Records are never updated or removed.
    async fn append(&self, record: &ActivityRecord) -> Result<(), ActivityLogError>;
}

/// Writes audit records to the tracing output instead of a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActivityLog;

#[async_trait]
impl ActivityLog for TracingActivityLog {
    async fn append(&self, record: &ActivityRecord) -> Result<(), ActivityLogError> {
        info!(
            action = %record.action(),
            user_id = record.user_id().map(|id| id.to_string()),
            timestamp = %record.timestamp(),
            "activity recorded"
        );
        Ok(())
    }
}
