//! Outbound email port.
use async_trait::async_trait;
use tracing::info;

use crate::domain::OutgoingEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail transport adapters.
    pub enum MailTransportError {
        /// Mail service could not be reached.
        Transport { message: String } => "mail transport failed: {message}",
        /// Mail service answered with a non-success status.
        Rejected { status: u16 } => "mail service rejected message with status {status}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand `email` to the transport. Delivery is not confirmed.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailTransportError>;
}

/// Logs outgoing mail instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailTransport;

#[async_trait]
impl MailTransport for TracingMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailTransportError> {
        info!(
            recipient = email.recipient(),
            subject = email.subject(),
            "mail transport not configured; email logged only"
        );
        Ok(())
    }
}
