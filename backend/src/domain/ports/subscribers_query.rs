//! Driving port for subscriber reads.

use async_trait::async_trait;

use crate::domain::{Error, Subscriber, SubscriberId};

/// Message returned when a subscriber id is unknown.
pub const SUBSCRIBER_NOT_FOUND_MESSAGE: &str = "Subscriber not found";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscribersQuery: Send + Sync {
    /// Every subscriber, ordered by name then id.
    async fn list(&self) -> Result<Vec<Subscriber>, Error>;

    /// One subscriber, or `ErrorCode::NotFound`.
    async fn get(&self, id: SubscriberId) -> Result<Subscriber, Error>;
}
