//! PostgreSQL-backed `SubscriberRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{SubscriberRepository, SubscriberRepositoryError};
use crate::domain::{Subscriber, SubscriberId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubscriberRow, SubscriberRow, SubscriberUpdate};
use super::pool::DbPool;
use super::schema::subscribers;

/// Diesel-backed subscriber storage.
///
/// `updated_at` is stamped from the injected clock.
#[derive(Clone)]
pub struct DieselSubscriberRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselSubscriberRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn pool_error(error: super::pool::PoolError) -> SubscriberRepositoryError {
    map_pool_error(error, SubscriberRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SubscriberRepositoryError {
    map_diesel_error(
        error,
        SubscriberRepositoryError::query,
        SubscriberRepositoryError::connection,
    )
}

fn changeset<'a>(subscriber: &'a Subscriber, clock: &dyn Clock) -> SubscriberUpdate<'a> {
    SubscriberUpdate {
        name: subscriber.name(),
        email: subscriber.email(),
        subs_date: subscriber.subs_date(),
        description: subscriber.description(),
        updated_at: clock.utc(),
    }
}

fn row_to_subscriber(row: SubscriberRow) -> Subscriber {
    Subscriber::from_parts(
        SubscriberId::from_uuid(row.id),
        row.name,
        row.email,
        row.subs_date,
        row.description,
    )
}

#[async_trait]
impl SubscriberRepository for DieselSubscriberRepository {
    async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<SubscriberRow> = subscribers::table
            .select(SubscriberRow::as_select())
            .order_by((subscribers::name.asc(), subscribers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_subscriber).collect())
    }

    async fn find(&self, id: SubscriberId) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<SubscriberRow> = subscribers::table
            .filter(subscribers::id.eq(id.as_uuid()))
            .select(SubscriberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_subscriber))
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewSubscriberRow {
            id: *subscriber.id().as_uuid(),
            name: subscriber.name(),
            email: subscriber.email(),
            subs_date: subscriber.subs_date(),
            description: subscriber.description(),
        };
        diesel::insert_into(subscribers::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let update = changeset(subscriber, self.clock.as_ref());
        let updated = diesel::update(subscribers::table)
            .filter(subscribers::id.eq(subscriber.id().as_uuid()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: SubscriberId) -> Result<bool, SubscriberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(subscribers::table.filter(subscribers::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
