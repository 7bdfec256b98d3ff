//! Port abstraction for subscriber persistence.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Subscriber, SubscriberId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by subscriber repository adapters.
    pub enum SubscriberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "subscriber repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "subscriber repository query failed: {message}",
    }
}

/// Storage for subscriber records.
///
/// `update` and `delete` report whether a row with the given id existed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// All subscribers ordered by name, then id.
    async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError>;

    async fn find(&self, id: SubscriberId) -> Result<Option<Subscriber>, SubscriberRepositoryError>;

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError>;

    async fn update(&self, subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError>;

    async fn delete(&self, id: SubscriberId) -> Result<bool, SubscriberRepositoryError>;
}

/// Process-local repository used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemorySubscriberRepository {
    rows: Mutex<HashMap<SubscriberId, Subscriber>>,
}

impl InMemorySubscriberRepository {
    fn with_rows<T>(
        &self,
        f: impl FnOnce(&mut HashMap<SubscriberId, Subscriber>) -> T,
    ) -> Result<T, SubscriberRepositoryError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| SubscriberRepositoryError::query("in-memory store poisoned"))?;
        Ok(f(&mut rows))
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError> {
        let mut subscribers = self.with_rows(|rows| rows.values().cloned().collect::<Vec<_>>())?;
        subscribers.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(subscribers)
    }

    async fn find(&self, id: SubscriberId) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        self.with_rows(|rows| rows.get(&id).cloned())
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        self.with_rows(|rows| {
            if rows.contains_key(&subscriber.id()) {
                Err(SubscriberRepositoryError::query(format!(
                    "duplicate subscriber id {}",
                    subscriber.id()
                )))
            } else {
                rows.insert(subscriber.id(), subscriber.clone());
                Ok(())
            }
        })?
    }

    async fn update(&self, subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError> {
        self.with_rows(|rows| match rows.get_mut(&subscriber.id()) {
            Some(slot) => {
                *slot = subscriber.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: SubscriberId) -> Result<bool, SubscriberRepositoryError> {
        self.with_rows(|rows| rows.remove(&id).is_some())
    }
}
