//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, SubscribersCommand, SubscribersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub subscribers: Arc<dyn SubscribersQuery>,
    pub subscriber_commands: Arc<dyn SubscribersCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use subscriber_api::domain::ports::{FixtureLoginService, InMemorySubscriberRepository};
    /// use subscriber_api::domain::{SideEffectDispatcher, SubscriberService};
    /// use subscriber_api::inbound::http::state::HttpState;
    ///
    /// let (dispatcher, _jobs) = SideEffectDispatcher::channel(8);
    /// let service = Arc::new(SubscriberService::new(
    ///     Arc::new(InMemorySubscriberRepository::default()),
    ///     dispatcher,
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        subscribers: Arc<dyn SubscribersQuery>,
        subscriber_commands: Arc<dyn SubscribersCommand>,
    ) -> Self {
        Self {
            login,
            subscribers,
            subscriber_commands,
        }
    }
}
