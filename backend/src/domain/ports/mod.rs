//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_log;
mod login_service;
mod mail_transport;
mod password_verifier;
mod subscriber_repository;
mod subscribers_command;
mod subscribers_query;
mod user_repository;

#[cfg(test)]
pub use activity_log::MockActivityLog;
pub use activity_log::{ActivityLog, ActivityLogError, TracingActivityLog};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, INVALID_CREDENTIALS_MESSAGE, LoginService};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{MailTransport, MailTransportError, TracingMailTransport};
#[cfg(test)]
pub use password_verifier::MockPasswordVerifier;
pub use password_verifier::{PasswordVerifier, PasswordVerifierError};
#[cfg(test)]
pub use subscriber_repository::MockSubscriberRepository;
pub use subscriber_repository::{
    InMemorySubscriberRepository, SubscriberRepository, SubscriberRepositoryError,
};
#[cfg(test)]
pub use subscribers_command::MockSubscribersCommand;
pub use subscribers_command::SubscribersCommand;
#[cfg(test)]
pub use subscribers_query::MockSubscribersQuery;
pub use subscribers_query::{SUBSCRIBER_NOT_FOUND_MESSAGE, SubscribersQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
