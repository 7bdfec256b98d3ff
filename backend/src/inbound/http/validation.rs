//! Shared validation helpers for inbound HTTP adapters.
//!
//! Converts domain validation rejections into the `400` envelope and owns the
//! JSON extractor configuration so malformed bodies share the same shape.

use actix_web::web;
use serde::Serialize;

use crate::domain::{Error, SubscriberId, ValidationRejection};

pub(crate) const REQUEST_VALIDATION_MESSAGE: &str = "request validation failed";
pub(crate) const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

/// Where a failing value came from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FieldLocation {
    Body,
    Params,
}

#[derive(Serialize)]
struct FailureEntry<'a> {
    field: &'a str,
    message: &'a str,
    location: FieldLocation,
}

/// Build the `400` error whose envelope message is the failure list.
pub(crate) fn rejection_error(rejection: &ValidationRejection, location: FieldLocation) -> Error {
    let entries: Vec<FailureEntry<'_>> = rejection
        .failures()
        .iter()
        .map(|failure| FailureEntry {
            field: failure.field(),
            message: failure.message(),
            location,
        })
        .collect();
    match serde_json::to_value(entries) {
        Ok(details) => Error::invalid_request(REQUEST_VALIDATION_MESSAGE).with_details(details),
        Err(err) => Error::internal(format!("failed to encode validation failures: {err}")),
    }
}

/// Parse the `:id` path segment.
pub(crate) fn parse_subscriber_id(raw: &str) -> Result<SubscriberId, Error> {
    raw.parse().map_err(|_| {
        rejection_error(
            &ValidationRejection::single("id", "Id is not valid"),
            FieldLocation::Params,
        )
    })
}

/// JSON extractor configuration mapping decode failures to the API envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected malformed JSON body");
        Error::invalid_request(INVALID_JSON_MESSAGE).into()
    })
}
