//! Subscriber use-cases over the repository port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    SUBSCRIBER_NOT_FOUND_MESSAGE, SubscriberRepository, SubscribersCommand, SubscribersQuery,
};
use crate::domain::{
    CollaboratorTimeout, Error, NewSubscriber, OutgoingEmail, SideEffect, SideEffectDispatcher,
    Subscriber, SubscriberId, SubscriberPatch,
};

/// Implements the subscriber driving ports.
#[derive(Clone)]
pub struct SubscriberService<R> {
    repository: Arc<R>,
    side_effects: SideEffectDispatcher,
    timeout: CollaboratorTimeout,
}

impl<R> SubscriberService<R> {
    pub fn new(repository: Arc<R>, side_effects: SideEffectDispatcher) -> Self {
        Self {
            repository,
            side_effects,
            timeout: CollaboratorTimeout::default(),
        }
    }

    /// Override the collaborator timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: CollaboratorTimeout) -> Self {
        self.timeout = timeout;
        self
    }
}

fn not_found() -> Error {
    Error::not_found(SUBSCRIBER_NOT_FOUND_MESSAGE)
}

impl<R: SubscriberRepository> SubscriberService<R> {
    async fn find(&self, id: SubscriberId) -> Result<Subscriber, Error> {
        self.timeout
            .call("subscribers.find", self.repository.find(id))
            .await?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl<R> SubscribersQuery for SubscriberService<R>
where
    R: SubscriberRepository + 'static,
{
    async fn list(&self) -> Result<Vec<Subscriber>, Error> {
        self.timeout
            .call("subscribers.list", self.repository.list())
            .await
    }

    async fn get(&self, id: SubscriberId) -> Result<Subscriber, Error> {
        self.find(id).await
    }
}

#[async_trait]
impl<R> SubscribersCommand for SubscriberService<R>
where
    R: SubscriberRepository + 'static,
{
    async fn create(&self, draft: NewSubscriber) -> Result<Subscriber, Error> {
        let subscriber = Subscriber::new(SubscriberId::random(), draft);
        self.timeout
            .call("subscribers.insert", self.repository.insert(&subscriber))
            .await?;
        info!(subscriber_id = %subscriber.id(), "subscriber created");
        self.side_effects
            .submit(SideEffect::SendWelcomeEmail(OutgoingEmail::welcome(
                &subscriber,
            )));
        Ok(subscriber)
    }

    async fn update(&self, id: SubscriberId, patch: SubscriberPatch) -> Result<Subscriber, Error> {
        let updated = patch.apply(self.find(id).await?);
        let found = self
            .timeout
            .call("subscribers.update", self.repository.update(&updated))
            .await?;
        if !found {
            return Err(not_found());
        }
        Ok(updated)
    }

    async fn delete(&self, id: SubscriberId) -> Result<(), Error> {
        let found = self
            .timeout
            .call("subscribers.delete", self.repository.delete(id))
            .await?;
        if found {
            info!(subscriber_id = %id, "subscriber deleted");
            Ok(())
        } else {
            Err(not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        InMemorySubscriberRepository, MockSubscriberRepository, SubscriberRepositoryError,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::time::Duration;

    fn draft() -> NewSubscriber {
        let body = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subs_date": "2024-01-01",
            "description": "Engines",
        });
        NewSubscriber::try_from_fields(body.as_object().expect("object")).expect("draft")
    }

    #[fixture]
    fn in_memory() -> (
        SubscriberService<InMemorySubscriberRepository>,
        tokio::sync::mpsc::Receiver<crate::domain::SideEffectJob>,
    ) {
        let (dispatcher, receiver) = SideEffectDispatcher::channel(8);
        let service = SubscriberService::new(
            Arc::new(InMemorySubscriberRepository::default()),
            dispatcher,
        );
        (service, receiver)
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_and_queues_welcome_email(
        in_memory: (
            SubscriberService<InMemorySubscriberRepository>,
            tokio::sync::mpsc::Receiver<crate::domain::SideEffectJob>,
        ),
    ) {
        let (service, mut jobs) = in_memory;
        let created = service.create(draft()).await.expect("created");

        assert_eq!(service.get(created.id()).await.expect("stored"), created);
        match jobs.try_recv().expect("email queued").into_effect() {
            SideEffect::SendWelcomeEmail(email) => {
                assert_eq!(email.recipient(), "ada@example.com");
            }
            other => panic!("unexpected side effect: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn failed_insert_queues_nothing() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_insert()
            .return_once(|_| Err(SubscriberRepositoryError::connection("refused")));
        let (dispatcher, mut jobs) = SideEffectDispatcher::channel(8);
        let service = SubscriberService::new(Arc::new(repo), dispatcher);

        let err = service.create(draft()).await.expect_err("insert fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(jobs.try_recv().is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_ids_are_not_found(
        in_memory: (
            SubscriberService<InMemorySubscriberRepository>,
            tokio::sync::mpsc::Receiver<crate::domain::SideEffectJob>,
        ),
    ) {
        let (service, _jobs) = in_memory;
        let id = SubscriberId::random();
        let patch_body = json!({ "name": "Grace" });
        let patch = SubscriberPatch::try_from_fields(patch_body.as_object().expect("object"))
            .expect("patch");

        for err in [
            service.get(id).await.expect_err("get"),
            service.update(id, patch).await.expect_err("update"),
            service.delete(id).await.expect_err("delete"),
        ] {
            assert_eq!(err.code(), ErrorCode::NotFound);
            assert_eq!(err.message(), SUBSCRIBER_NOT_FOUND_MESSAGE);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_absent_fields(
        in_memory: (
            SubscriberService<InMemorySubscriberRepository>,
            tokio::sync::mpsc::Receiver<crate::domain::SideEffectJob>,
        ),
    ) {
        let (service, _jobs) = in_memory;
        let created = service.create(draft()).await.expect("created");
        let body = json!({ "subs_date": "2025-02-02" });
        let patch = SubscriberPatch::try_from_fields(body.as_object().expect("object"))
            .expect("patch");

        let updated = service.update(created.id(), patch).await.expect("updated");

        assert_eq!(updated.subs_date(), "2025-02-02");
        assert_eq!(updated.name(), created.name());
        assert_eq!(service.list().await.expect("list"), vec![updated]);
    }

    struct StalledRepository;

    #[async_trait]
    impl SubscriberRepository for StalledRepository {
        async fn list(&self) -> Result<Vec<Subscriber>, SubscriberRepositoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn find(
            &self,
            _id: SubscriberId,
        ) -> Result<Option<Subscriber>, SubscriberRepositoryError> {
            Ok(None)
        }

        async fn insert(&self, _subscriber: &Subscriber) -> Result<(), SubscriberRepositoryError> {
            Ok(())
        }

        async fn update(&self, _subscriber: &Subscriber) -> Result<bool, SubscriberRepositoryError> {
            Ok(false)
        }

        async fn delete(&self, _id: SubscriberId) -> Result<bool, SubscriberRepositoryError> {
            Ok(false)
        }
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn slow_repository_is_internal_error() {
        let (dispatcher, _jobs) = SideEffectDispatcher::channel(1);
        let service = SubscriberService::new(Arc::new(StalledRepository), dispatcher)
            .with_timeout(CollaboratorTimeout::from_millis(100));

        let err = service.list().await.expect_err("timed out");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
