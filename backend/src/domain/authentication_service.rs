//! Login and logout use-cases.
//!
//! Implements [`LoginService`] over the account repository and password
//! verifier. Successful logins and known-user logouts queue an activity
//! record; the caller's response never waits on it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    INVALID_CREDENTIALS_MESSAGE, LoginService, PasswordVerifier, UserRepository,
};
use crate::domain::{
    ActivityAction, ActivityRecord, CollaboratorTimeout, Error, LoginCredentials, SideEffect,
    SideEffectDispatcher, UserId,
};

/// Credential checking backed by stored bcrypt hashes.
#[derive(Clone)]
pub struct AuthenticationService<U, V> {
    users: Arc<U>,
    verifier: Arc<V>,
    side_effects: SideEffectDispatcher,
    clock: Arc<dyn Clock>,
    timeout: CollaboratorTimeout,
}

impl<U, V> AuthenticationService<U, V> {
    pub fn new(
        users: Arc<U>,
        verifier: Arc<V>,
        side_effects: SideEffectDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            verifier,
            side_effects,
            clock,
            timeout: CollaboratorTimeout::default(),
        }
    }

    /// Override the collaborator timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: CollaboratorTimeout) -> Self {
        self.timeout = timeout;
        self
    }

    fn record(&self, action: ActivityAction, user_id: Option<UserId>) {
        let record = ActivityRecord::now(action, user_id, self.clock.as_ref());
        self.side_effects.submit(SideEffect::RecordActivity(record));
    }
}

impl<U, V> AuthenticationService<U, V>
where
    V: PasswordVerifier + 'static,
{
    async fn password_matches(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let verifier = Arc::clone(&self.verifier);
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        let check = tokio::task::spawn_blocking(move || verifier.verify(&password, &hash));
        match self.timeout.run(check).await {
            Ok(Ok(matched)) => Ok(matched),
            Ok(Err(err)) => {
                error!(error = %err, "stored password hash could not be checked");
                Err(Error::internal(format!("password verification failed: {err}")))
            }
            Err(failure) => Err(failure.into_domain("password.verify")),
        }
    }
}

#[async_trait]
impl<U, V> LoginService for AuthenticationService<U, V>
where
    U: UserRepository + 'static,
    V: PasswordVerifier + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .timeout
            .call(
                "users.find_by_email",
                self.users.find_by_email(credentials.email()),
            )
            .await?;
        let Some(account) = account else {
            debug!("login rejected: unknown account");
            return Err(Error::not_found(INVALID_CREDENTIALS_MESSAGE));
        };

        if !self
            .password_matches(credentials.password(), account.password_hash())
            .await?
        {
            debug!(user_id = %account.id(), "login rejected: password mismatch");
            return Err(Error::not_found(INVALID_CREDENTIALS_MESSAGE));
        }

        let user_id = account.id().clone();
        self.record(ActivityAction::Login, Some(user_id.clone()));
        Ok(user_id)
    }

    fn record_logout(&self, user_id: Option<UserId>) {
        if user_id.is_some() {
            self.record(ActivityAction::Logout, user_id);
        }
    }
}
