//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while shaping every
//! failure into the API envelope:
//! - `401` is the plain-text body `Unauthorized`.
//! - Validation failures carry their failure list as `message`.
//! - `500` bodies are redacted to `Internal server error`.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub(crate) const UNAUTHORIZED_BODY: &str = "Unauthorized";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum EnvelopeMessage<'a> {
    Text(&'a str),
    Failures(&'a Value),
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: bool,
    message: EnvelopeMessage<'a>,
}

fn envelope_message(error: &Error) -> EnvelopeMessage<'_> {
    match (error.code(), error.details()) {
        (ErrorCode::InternalError, _) => EnvelopeMessage::Text(INTERNAL_ERROR_MESSAGE),
        (ErrorCode::InvalidRequest, Some(details @ Value::Array(_))) => {
            EnvelopeMessage::Failures(details)
        }
        _ => EnvelopeMessage::Text(error.message()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if self.code() == ErrorCode::Unauthorized {
            return builder
                .content_type(ContentType::plaintext())
                .body(UNAUTHORIZED_BODY);
        }
        if self.code() == ErrorCode::InternalError {
            error!(trace_id = self.trace_id(), error = %self.message(), "request failed");
        }
        builder.json(ErrorEnvelope {
            status: false,
            message: envelope_message(self),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
