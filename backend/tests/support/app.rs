//! App construction shared by the HTTP integration suites.
//!
//! Mirrors the production wiring: `/api` scope behind cookie sessions, the
//! JSON extractor config, `Trace`, and the catch-all 404.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use tokio::sync::mpsc::Receiver;

use subscriber_api::Trace;
use subscriber_api::domain::ports::{
    FixtureUserRepository, LoginService, SubscriberRepository, UserRepository,
};
use subscriber_api::domain::{
    AuthenticationService, CollaboratorTimeout, SideEffectDispatcher, SideEffectJob,
    SubscriberService, UserAccount, UserId,
};
use subscriber_api::inbound::http::routes::{api_routes, not_found};
use subscriber_api::inbound::http::state::HttpState;
use subscriber_api::inbound::http::validation::json_config;
use subscriber_api::outbound::password::BcryptPasswordVerifier;

pub(crate) const ADMIN_EMAIL: &str = "admin@example.com";
pub(crate) const ADMIN_PASSWORD: &str = "password";
#[allow(dead_code, reason = "only the HTTP flow suite checks the user id")]
pub(crate) const ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

pub(crate) fn subscriber_app(
    state: web::Data<HttpState>,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build();
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").wrap(session).configure(api_routes))
        .default_service(web::to(not_found))
}

/// Users repository holding the admin account with a low-cost bcrypt hash.
pub(crate) fn admin_users() -> FixtureUserRepository {
    let verifier = BcryptPasswordVerifier::with_cost(4);
    let hash = verifier.hash(ADMIN_PASSWORD).expect("hash admin password");
    let account = UserAccount::new(
        UserId::new(ADMIN_ID).expect("admin id"),
        ADMIN_EMAIL,
        hash,
    )
    .expect("admin account");
    FixtureUserRepository::new([account])
}

/// HTTP state plus the queue the services submit side effects to.
pub(crate) struct TestState {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) jobs: Receiver<SideEffectJob>,
}

/// Build state around the given repositories with real domain services.
pub(crate) fn build_state<U, R>(
    users: Arc<U>,
    subscribers: Arc<R>,
    timeout: CollaboratorTimeout,
) -> TestState
where
    U: UserRepository + 'static,
    R: SubscriberRepository + 'static,
{
    let (dispatcher, jobs) = SideEffectDispatcher::channel(32);
    let login: Arc<dyn LoginService> = Arc::new(
        AuthenticationService::new(
            users,
            Arc::new(BcryptPasswordVerifier::with_cost(4)),
            dispatcher.clone(),
            Arc::new(mockable::DefaultClock),
        )
        .with_timeout(timeout),
    );
    let service = Arc::new(SubscriberService::new(subscribers, dispatcher).with_timeout(timeout));
    TestState {
        http_state: web::Data::new(HttpState::new(login, service.clone(), service)),
        jobs,
    }
}
