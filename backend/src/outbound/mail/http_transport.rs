//! Reqwest-backed mail API adapter.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication and HTTP status mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::OutgoingEmail;
use crate::domain::ports::{MailTransport, MailTransportError};

const DEFAULT_USER_AGENT: &str = "subscriber-api-mailer/0.1";

/// Endpoint and identity for the mail API.
pub struct MailApiSettings {
    pub endpoint: Url,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub token: Option<Zeroizing<String>>,
    /// `from` address on every message.
    pub sender: String,
}

/// Mail transport that POSTs one JSON document per message.
pub struct HttpMailTransport {
    client: Client,
    endpoint: Url,
    token: Option<Zeroizing<String>>,
    sender: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailTransport {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: MailApiSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        let MailApiSettings {
            endpoint,
            token,
            sender,
        } = settings;
        Ok(Self {
            client,
            endpoint,
            token,
            sender,
        })
    }

    fn payload<'a>(&'a self, email: &'a OutgoingEmail) -> MailPayload<'a> {
        MailPayload {
            from: self.sender.as_str(),
            to: email.recipient(),
            subject: email.subject(),
            text: email.body(),
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailTransportError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&self.payload(email));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(map_transport_error)?;
        check_status(response.status())
    }
}

fn map_transport_error(error: reqwest::Error) -> MailTransportError {
    MailTransportError::transport(error.to_string())
}

fn check_status(status: StatusCode) -> Result<(), MailTransportError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(MailTransportError::rejected(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Subscriber, SubscriberId};
    use rstest::rstest;

    fn transport() -> HttpMailTransport {
        HttpMailTransport::new(
            MailApiSettings {
                endpoint: Url::parse("https://mail.example.test/send").expect("url"),
                token: Some(Zeroizing::new("secret".into())),
                sender: "noreply@example.com".into(),
            },
            Duration::from_secs(1),
        )
        .expect("client builds")
    }

    #[test]
    fn payload_uses_sender_and_email_fields() {
        let subscriber = Subscriber::from_parts(
            SubscriberId::random(),
            "Ada",
            "ada@example.com",
            "2024-01-01",
            "Digest",
        );
        let email = OutgoingEmail::welcome(&subscriber);
        let transport = transport();
        let payload = transport.payload(&email);
        assert_eq!(payload.from, "noreply@example.com");
        assert_eq!(payload.to, "ada@example.com");
        assert_eq!(payload.subject, email.subject());
        assert_eq!(payload.text, email.body());
    }

    #[rstest]
    #[case(StatusCode::OK)]
    #[case(StatusCode::ACCEPTED)]
    fn success_statuses_pass(#[case] status: StatusCode) {
        assert!(check_status(status).is_ok());
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::SERVICE_UNAVAILABLE)]
    fn other_statuses_are_rejections(#[case] status: StatusCode) {
        assert_eq!(
            check_status(status),
            Err(MailTransportError::rejected(status.as_u16()))
        );
    }
}
