//! Test doubles for driven ports.

use std::future::pending;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use subscriber_api::domain::ports::{
    ActivityLog, ActivityLogError, InMemorySubscriberRepository, MailTransport,
    MailTransportError, SubscriberRepository, SubscriberRepositoryError, UserPersistenceError,
    UserRepository,
};
use subscriber_api::domain::{
    ActivityRecord, OutgoingEmail, Subscriber, SubscriberId, UserAccount,
};

/// In-memory repository that records the name of every call.
#[derive(Clone, Default)]
pub(crate) struct RecordingSubscriberRepository {
    inner: Arc<InMemorySubscriberRepository>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingSubscriberRepository {
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("repository calls lock").clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("repository calls lock").push(call);
    }
}

#[async_trait]
impl SubscriberRepository for RecordingSubscriberRepository {
    async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError> {
        self.record("list");
        self.inner.list().await
    }

    async fn find(&self, id: SubscriberId) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        self.record("find");
        self.inner.find(id).await
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        self.record("insert");
        self.inner.insert(subscriber).await
    }

    async fn update(&self, subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError> {
        self.record("update");
        self.inner.update(subscriber).await
    }

    async fn delete(&self, id: SubscriberId) -> Result<bool, SubscriberRepositoryError> {
        self.record("delete");
        self.inner.delete(id).await
    }
}

/// Repository whose calls never complete.
#[derive(Clone, Copy, Default)]
pub(crate) struct StalledSubscriberRepository;

#[async_trait]
impl SubscriberRepository for StalledSubscriberRepository {
    async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError> {
        pending().await
    }

    async fn find(&self, _id: SubscriberId) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
        pending().await
    }

    async fn insert(&self, _subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
        pending().await
    }

    async fn update(&self, _subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError> {
        pending().await
    }

    async fn delete(&self, _id: SubscriberId) -> Result<bool, SubscriberRepositoryError> {
        pending().await
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct StalledUserRepository;

#[async_trait]
impl UserRepository for StalledUserRepository {
    async fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        pending().await
    }
}

/// Activity log that rejects every append and counts the attempts.
#[derive(Clone, Default)]
pub(crate) struct FailingActivityLog {
    attempts: Arc<Mutex<Vec<ActivityRecord>>>,
}

impl FailingActivityLog {
    pub(crate) fn attempts(&self) -> Vec<ActivityRecord> {
        self.attempts.lock().expect("activity attempts lock").clone()
    }
}

#[async_trait]
impl ActivityLog for FailingActivityLog {
    async fn append(&self, record: &ActivityRecord) -> Result<(), ActivityLogError> {
        self.attempts
            .lock()
            .expect("activity attempts lock")
            .push(record.clone());
        Err(ActivityLogError::write("store unavailable"))
    }
}

/// Mail transport that rejects every message and counts the attempts.
#[derive(Clone, Default)]
pub(crate) struct FailingMailTransport {
    attempts: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl FailingMailTransport {
    pub(crate) fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().expect("mail attempts lock").clone()
    }
}

#[async_trait]
impl MailTransport for FailingMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailTransportError> {
        self.attempts
            .lock()
            .expect("mail attempts lock")
            .push(email.clone());
        Err(MailTransportError::rejected(503_u16))
    }
}
