//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound layer (auth, subscribers, health)
//! - **Schemas**: envelope and domain type wrappers from
//!   [`crate::inbound::http::schemas`], keeping domain types free of utoipa
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, LoginDataSchema, LoginEnvelopeSchema, LoginRequestSchema,
    MessageEnvelopeSchema, SubscriberEnvelopeSchema, SubscriberListEnvelopeSchema,
    SubscriberPatchSchema, SubscriberRequestSchema, SubscriberSchema, ValidationFailureSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Subscriber API",
        description = "Session-authenticated subscriber management with health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::subscribers::list_subscribers,
        crate::inbound::http::subscribers::get_subscriber,
        crate::inbound::http::subscribers::create_subscriber,
        crate::inbound::http::subscribers::update_subscriber,
        crate::inbound::http::subscribers::delete_subscriber,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SubscriberSchema,
        ValidationFailureSchema,
        ErrorEnvelopeSchema,
        LoginRequestSchema,
        LoginDataSchema,
        LoginEnvelopeSchema,
        MessageEnvelopeSchema,
        SubscriberRequestSchema,
        SubscriberPatchSchema,
        SubscriberEnvelopeSchema,
        SubscriberListEnvelopeSchema
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "subscribers", description = "Subscriber management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
