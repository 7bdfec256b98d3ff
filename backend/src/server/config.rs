//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;
use subscriber_api::domain::{CollaboratorTimeout, DEFAULT_QUEUE_CAPACITY};
use subscriber_api::outbound::mail::MailApiSettings;
use subscriber_api::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mail: Option<MailApiSettings>,
    pub(crate) collaborator_timeout: CollaboratorTimeout,
    pub(crate) side_effect_queue_capacity: usize,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and an address.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            mail: None,
            collaborator_timeout: CollaboratorTimeout::default(),
            side_effect_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, users, subscribers and the activity log are stored in
    /// PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deliver welcome mail through a JSON mail API.
    #[must_use]
    pub fn with_mail_api(mut self, mail: MailApiSettings) -> Self {
        self.mail = Some(mail);
        self
    }

    #[must_use]
    pub fn with_collaborator_timeout(mut self, timeout: CollaboratorTimeout) -> Self {
        self.collaborator_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_side_effect_queue_capacity(mut self, capacity: usize) -> Self {
        self.side_effect_queue_capacity = capacity;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
