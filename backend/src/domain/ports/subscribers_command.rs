//! Driving port for subscriber writes.
//!
//! Inputs arrive already validated: [`NewSubscriber`] and [`SubscriberPatch`]
//! can only be built by running the subscriber rule-set.

use async_trait::async_trait;

use crate::domain::{Error, NewSubscriber, Subscriber, SubscriberId, SubscriberPatch};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscribersCommand: Send + Sync {
    /// Store a new subscriber and queue its confirmation email.
    async fn create(&self, draft: NewSubscriber) -> Result<Subscriber, Error>;

    /// Apply `patch` to an existing subscriber.
    async fn update(&self, id: SubscriberId, patch: SubscriberPatch) -> Result<Subscriber, Error>;

    /// Remove a subscriber.
    async fn delete(&self, id: SubscriberId) -> Result<(), Error>;
}
