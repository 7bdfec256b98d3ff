//! Success envelope shared by every JSON handler.
//!
//! Successful responses are `{status: true, message?, data?}`; error bodies
//! are shaped by the `ResponseError` impl in [`super::error`].

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// Body of a successful response.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            status: true,
            message: None,
            data: Some(data),
        }
    }

    /// Envelope carrying a message and `data`.
    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            status: true,
            message: Some(message),
            data: Some(data),
        }
    }

    /// Render the envelope as a JSON response with `status`.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl Envelope<()> {
    /// Envelope carrying only a message.
    pub fn message(message: &'static str) -> Self {
        Self {
            status: true,
            message: Some(message),
            data: None,
        }
    }
}
