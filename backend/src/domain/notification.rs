//! Outgoing email messages.

use super::Subscriber;

/// Subject line for the subscription confirmation.
pub const WELCOME_SUBJECT: &str = "Subscription confirmed";

/// Plain-text message handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    recipient: String,
    subject: String,
    body: String,
}

impl OutgoingEmail {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Confirmation sent after a subscriber is created.
    ///
    /// # Examples
    /// ```
    /// use subscriber_api::domain::{OutgoingEmail, Subscriber, SubscriberId};
    ///
    /// let subscriber = Subscriber::from_parts(
    ///     SubscriberId::random(),
    ///     "Ada",
    ///     "ada@example.com",
    ///     "2024-01-01",
    ///     "Engines",
    /// );
    /// let email = OutgoingEmail::welcome(&subscriber);
    /// assert_eq!(email.recipient(), "ada@example.com");
    /// assert_eq!(email.subject(), "Subscription confirmed");
    /// ```
    pub fn welcome(subscriber: &Subscriber) -> Self {
        let body = format!(
            "Hello {name},\n\nYour subscription starting {date} is confirmed.\n\nThank you for subscribing.\n",
            name = subscriber.name(),
            date = subscriber.subs_date(),
        );
        Self::new(subscriber.email(), WELCOME_SUBJECT, body)
    }

    pub fn recipient(&self) -> &str {
        self.recipient.as_str()
    }

    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}
