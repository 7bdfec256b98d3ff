//! PostgreSQL-backed `ActivityLog` adapter writing to `activity_logs`.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ActivityRecord;
use crate::domain::ports::{ActivityLog, ActivityLogError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewActivityLogRow;
use super::pool::DbPool;
use super::schema::activity_logs;

/// Appends audit records with one `INSERT` each.
#[derive(Clone)]
pub struct DieselActivityLog {
    pool: DbPool,
}

impl DieselActivityLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_row(record: &ActivityRecord) -> NewActivityLogRow<'_> {
    NewActivityLogRow {
        action: record.action().as_str(),
        user_id: record.user_id().map(|id| *id.as_uuid()),
        recorded_at: record.timestamp(),
    }
}

#[async_trait]
impl ActivityLog for DieselActivityLog {
    async fn append(&self, record: &ActivityRecord) -> Result<(), ActivityLogError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ActivityLogError::connection))?;
        diesel::insert_into(activity_logs::table)
            .values(&to_row(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(err, ActivityLogError::write, ActivityLogError::connection)
            })
    }
}
