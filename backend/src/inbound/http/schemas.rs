//! OpenAPI schema definitions for domain types and API envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! Handlers read request bodies as raw JSON maps so the validation chain sees
//! every field, so the request shapes documented here exist only for the
//! generated document.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Subscriber`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Subscriber)]
pub struct SubscriberSchema {
    /// Stable subscriber identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    /// Subscription date in `YYYY-MM-DD` form.
    #[schema(example = "2024-01-01")]
    subs_date: String,
    #[schema(example = "Monthly digest")]
    description: String,
}

/// One failing field reported by the validation chain.
#[derive(ToSchema)]
pub struct ValidationFailureSchema {
    #[schema(example = "subs_date")]
    field: String,
    #[schema(example = "Invalid date format. Use YYYY-MM-DD format")]
    message: String,
    /// `body` for request fields, `params` for path segments.
    #[schema(example = "body")]
    location: String,
}

/// Error envelope for `400`, `404` and `500` responses.
///
/// `message` is a string, or the list of validation failures for `400`
/// responses produced by the validation chain.
#[derive(ToSchema)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = false)]
    status: bool,
    #[schema(value_type = Object, example = "Subscriber not found")]
    message: serde_json::Value,
}

/// Body of `POST /api/login`.
#[derive(ToSchema)]
pub struct LoginRequestSchema {
    #[schema(example = "admin@example.com")]
    email: String,
    #[schema(example = "password")]
    password: String,
}

/// Body of `POST /api/subscribers`.
#[derive(ToSchema)]
pub struct SubscriberRequestSchema {
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "2024-01-01")]
    subs_date: String,
    #[schema(example = "Monthly digest")]
    description: String,
}

/// Body of `PATCH /api/subscribers/{id}`. At least one field is required.
#[derive(ToSchema)]
pub struct SubscriberPatchSchema {
    name: Option<String>,
    email: Option<String>,
    subs_date: Option<String>,
    description: Option<String>,
}

/// `data` of a successful login.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoginDataSchema {
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
}

/// Success envelope carrying only a message.
#[derive(ToSchema)]
pub struct MessageEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    #[schema(example = "Logout successful")]
    message: String,
}

/// Success envelope for `POST /api/login`.
#[derive(ToSchema)]
pub struct LoginEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    #[schema(example = "Login successful")]
    message: String,
    data: LoginDataSchema,
}

/// Success envelope carrying one subscriber.
#[derive(ToSchema)]
pub struct SubscriberEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    message: Option<String>,
    data: SubscriberSchema,
}

/// Success envelope carrying every subscriber.
#[derive(ToSchema)]
pub struct SubscriberListEnvelopeSchema {
    #[schema(example = true)]
    status: bool,
    data: Vec<SubscriberSchema>,
}
