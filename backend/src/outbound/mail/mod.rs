//! Mail outbound adapters.
//!
//! A thin HTTP implementation of the `MailTransport` port for JSON mail APIs.

mod http_transport;

pub use http_transport::{HttpMailTransport, MailApiSettings};
