//! Builders for HTTP state ports and the side-effect worker.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use subscriber_api::domain::ports::{
    ActivityLog, FixtureLoginService, FixtureUserRepository, InMemorySubscriberRepository,
    LoginService, MailTransport, SubscribersCommand, SubscribersQuery, TracingActivityLog,
    TracingMailTransport,
};
use subscriber_api::domain::{
    AuthenticationService, CollaboratorTimeout, SideEffectDispatcher, SideEffectPorts,
    SubscriberService, UserAccount, UserId, spawn_side_effects,
};
use subscriber_api::inbound::http::state::HttpState;
use subscriber_api::outbound::mail::{HttpMailTransport, MailApiSettings};
use subscriber_api::outbound::password::BcryptPasswordVerifier;
use subscriber_api::outbound::persistence::{
    DbPool, DieselActivityLog, DieselSubscriberRepository, DieselUserRepository,
};

use super::ServerConfig;

const FIXTURE_LOGIN_EMAIL: &str = "admin@example.com";
const FIXTURE_LOGIN_PASSWORD: &str = "password";

/// Shared HTTP state plus the handle of the worker draining side effects.
pub(crate) struct BuiltState {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) worker: JoinHandle<()>,
}

fn build_side_effect_ports(
    pool: Option<&DbPool>,
    mail: Option<MailApiSettings>,
    timeout: CollaboratorTimeout,
) -> io::Result<SideEffectPorts> {
    let activity_log: Arc<dyn ActivityLog> = match pool {
        Some(pool) => Arc::new(DieselActivityLog::new(pool.clone())),
        None => Arc::new(TracingActivityLog),
    };
    let mail: Arc<dyn MailTransport> = match mail {
        Some(settings) => {
            info!(endpoint = %settings.endpoint, "delivering mail through HTTP API");
            let transport = HttpMailTransport::new(settings, timeout.limit())
                .map_err(|err| io::Error::other(format!("mail client setup failed: {err}")))?;
            Arc::new(transport)
        }
        None => {
            warn!("no mail API configured; outgoing mail is only logged");
            Arc::new(TracingMailTransport)
        }
    };
    Ok(SideEffectPorts { activity_log, mail })
}

/// Account available when running without a database.
fn fixture_account(verifier: &BcryptPasswordVerifier) -> io::Result<UserAccount> {
    let id = UserId::new(FixtureLoginService::USER_ID)
        .map_err(|err| io::Error::other(format!("invalid fixture user id: {err}")))?;
    let hash = verifier
        .hash(FIXTURE_LOGIN_PASSWORD)
        .map_err(|err| io::Error::other(format!("fixture password hashing failed: {err}")))?;
    UserAccount::new(id, FIXTURE_LOGIN_EMAIL, hash)
        .map_err(|err| io::Error::other(format!("invalid fixture account: {err}")))
}

fn build_login_service(
    pool: Option<&DbPool>,
    verifier: BcryptPasswordVerifier,
    side_effects: SideEffectDispatcher,
    timeout: CollaboratorTimeout,
) -> io::Result<Arc<dyn LoginService>> {
    let verifier = Arc::new(verifier);
    let clock = Arc::new(DefaultClock);
    let service: Arc<dyn LoginService> = match pool {
        Some(pool) => Arc::new(
            AuthenticationService::new(
                Arc::new(DieselUserRepository::new(pool.clone())),
                verifier,
                side_effects,
                clock,
            )
            .with_timeout(timeout),
        ),
        None => {
            let users = FixtureUserRepository::new([fixture_account(&verifier)?]);
            Arc::new(
                AuthenticationService::new(Arc::new(users), verifier, side_effects, clock)
                    .with_timeout(timeout),
            )
        }
    };
    Ok(service)
}

fn build_subscriber_pair(
    pool: Option<&DbPool>,
    side_effects: SideEffectDispatcher,
    timeout: CollaboratorTimeout,
) -> (Arc<dyn SubscribersQuery>, Arc<dyn SubscribersCommand>) {
    match pool {
        Some(pool) => {
            let repository = Arc::new(DieselSubscriberRepository::new(
                pool.clone(),
                Arc::new(DefaultClock),
            ));
            let service =
                Arc::new(SubscriberService::new(repository, side_effects).with_timeout(timeout));
            (
                service.clone() as Arc<dyn SubscribersQuery>,
                service as Arc<dyn SubscribersCommand>,
            )
        }
        None => {
            let repository = Arc::new(InMemorySubscriberRepository::default());
            let service =
                Arc::new(SubscriberService::new(repository, side_effects).with_timeout(timeout));
            (
                service.clone() as Arc<dyn SubscribersQuery>,
                service as Arc<dyn SubscribersCommand>,
            )
        }
    }
}

/// Build the HTTP state and start the side-effect worker.
///
/// Must run inside a Tokio runtime. The mail settings are moved out of
/// `config`.
///
/// # Errors
///
/// Returns [`io::Error`] when the mail client or fixture account cannot be
/// prepared.
pub(crate) fn build_http_state(config: &mut ServerConfig) -> io::Result<BuiltState> {
    let pool = config.db_pool.as_ref();
    if pool.is_none() {
        warn!("no database configured; using in-memory subscribers and fixture login");
    }
    let timeout = config.collaborator_timeout;
    let ports = build_side_effect_ports(pool, config.mail.take(), timeout)?;
    let (dispatcher, worker) =
        spawn_side_effects(config.side_effect_queue_capacity, ports, timeout);

    let login = build_login_service(
        pool,
        BcryptPasswordVerifier::default(),
        dispatcher.clone(),
        timeout,
    )?;
    let (subscribers, subscriber_commands) = build_subscriber_pair(pool, dispatcher, timeout);

    Ok(BuiltState {
        http_state: web::Data::new(HttpState::new(login, subscribers, subscriber_commands)),
        worker,
    })
}

#[cfg(test)]
mod tests {
    //! Coverage for the fixture fallbacks.
    use super::*;
    use subscriber_api::domain::LoginCredentials;
    use subscriber_api::domain::ports::PasswordVerifier;

    #[test]
    fn fixture_account_accepts_the_documented_password() {
        let verifier = BcryptPasswordVerifier::with_cost(4);
        let account = fixture_account(&verifier).expect("fixture account");

        assert_eq!(account.email(), FIXTURE_LOGIN_EMAIL);
        assert!(
            verifier
                .verify(FIXTURE_LOGIN_PASSWORD, account.password_hash())
                .expect("verify")
        );
    }

    #[tokio::test]
    async fn fixture_login_authenticates_without_a_database() {
        let (dispatcher, _receiver) = SideEffectDispatcher::channel(4);
        let login = build_login_service(
            None,
            BcryptPasswordVerifier::with_cost(4),
            dispatcher,
            CollaboratorTimeout::default(),
        )
        .expect("login service");

        let credentials =
            LoginCredentials::try_from_parts(FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD)
                .expect("credentials");
        let user_id = login.authenticate(&credentials).await.expect("authenticated");
        assert_eq!(user_id.as_ref(), FixtureLoginService::USER_ID);
    }
}
