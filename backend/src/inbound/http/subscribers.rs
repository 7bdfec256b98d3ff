//! Subscriber CRUD handlers.
//!
//! ```text
//! GET    /api/subscribers
//! GET    /api/subscribers/{id}
//! POST   /api/subscribers {"name":"Ada","email":"ada@example.com","subs_date":"2024-01-01","description":"Digest"}
//! PATCH  /api/subscribers/{id} {"description":"Weekly"}
//! DELETE /api/subscribers/{id}
//! ```
//!
//! Every handler takes [`AuthenticatedUser`] first, so anonymous requests are
//! rejected before the body is read or a port is called.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde_json::{Map, Value};

use crate::domain::{NewSubscriber, SubscriberPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldLocation, parse_subscriber_id, rejection_error};

pub(crate) const CREATED_MESSAGE: &str = "Subscriber created";
pub(crate) const UPDATED_MESSAGE: &str = "Subscriber updated";
pub(crate) const DELETED_MESSAGE: &str = "Subscriber deleted";

/// List every subscriber ordered by name.
#[utoipa::path(
    get,
    path = "/api/subscribers",
    responses(
        (status = 200, description = "Subscribers", body = crate::inbound::http::schemas::SubscriberListEnvelopeSchema),
        (status = 401, description = "Unauthorised", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["subscribers"],
    operation_id = "listSubscribers"
)]
#[get("/subscribers")]
pub async fn list_subscribers(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let subscribers = state.subscribers.list().await?;
    Ok(Envelope::data(subscribers).respond(StatusCode::OK))
}

/// Fetch one subscriber.
#[utoipa::path(
    get,
    path = "/api/subscribers/{id}",
    params(("id" = String, Path, description = "Subscriber identifier")),
    responses(
        (status = 200, description = "Subscriber", body = crate::inbound::http::schemas::SubscriberEnvelopeSchema),
        (status = 400, description = "Malformed identifier", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 401, description = "Unauthorised", body = String, content_type = "text/plain"),
        (status = 404, description = "Subscriber not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["subscribers"],
    operation_id = "getSubscriber"
)]
#[get("/subscribers/{id}")]
pub async fn get_subscriber(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_subscriber_id(&path)?;
    let subscriber = state.subscribers.get(id).await?;
    Ok(Envelope::data(subscriber).respond(StatusCode::OK))
}

/// Create a subscriber once every field passes validation.
///
/// The confirmation email is queued after the write and never affects the
/// response.
#[utoipa::path(
    post,
    path = "/api/subscribers",
    request_body = crate::inbound::http::schemas::SubscriberRequestSchema,
    responses(
        (status = 201, description = "Subscriber created", body = crate::inbound::http::schemas::SubscriberEnvelopeSchema),
        (status = 400, description = "Validation failed", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 401, description = "Unauthorised", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["subscribers"],
    operation_id = "createSubscriber"
)]
#[post("/subscribers")]
pub async fn create_subscriber(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let draft = NewSubscriber::try_from_fields(&*payload)
        .map_err(|rejection| rejection_error(&rejection, FieldLocation::Body))?;
    let subscriber = state.subscriber_commands.create(draft).await?;
    Ok(Envelope::with_message(CREATED_MESSAGE, subscriber).respond(StatusCode::CREATED))
}

/// Update the fields present in the body.
#[utoipa::path(
    patch,
    path = "/api/subscribers/{id}",
    params(("id" = String, Path, description = "Subscriber identifier")),
    request_body = crate::inbound::http::schemas::SubscriberPatchSchema,
    responses(
        (status = 200, description = "Subscriber updated", body = crate::inbound::http::schemas::SubscriberEnvelopeSchema),
        (status = 400, description = "Validation failed or empty patch", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 401, description = "Unauthorised", body = String, content_type = "text/plain"),
        (status = 404, description = "Subscriber not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["subscribers"],
    operation_id = "updateSubscriber"
)]
#[patch("/subscribers/{id}")]
pub async fn update_subscriber(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let id = parse_subscriber_id(&path)?;
    let patch = SubscriberPatch::try_from_fields(&*payload)
        .map_err(|rejection| rejection_error(&rejection, FieldLocation::Body))?;
    let subscriber = state.subscriber_commands.update(id, patch).await?;
    Ok(Envelope::with_message(UPDATED_MESSAGE, subscriber).respond(StatusCode::OK))
}

/// Remove a subscriber.
#[utoipa::path(
    delete,
    path = "/api/subscribers/{id}",
    params(("id" = String, Path, description = "Subscriber identifier")),
    responses(
        (status = 200, description = "Subscriber deleted", body = crate::inbound::http::schemas::MessageEnvelopeSchema),
        (status = 400, description = "Malformed identifier", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 401, description = "Unauthorised", body = String, content_type = "text/plain"),
        (status = 404, description = "Subscriber not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["subscribers"],
    operation_id = "deleteSubscriber"
)]
#[delete("/subscribers/{id}")]
pub async fn delete_subscriber(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_subscriber_id(&path)?;
    state.subscriber_commands.delete(id).await?;
    Ok(Envelope::message(DELETED_MESSAGE).respond(StatusCode::OK))
}

#[cfg(test)]
mod tests;
