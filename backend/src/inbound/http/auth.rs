//! Login and logout handlers.
//!
//! ```text
//! POST /api/login {"email":"admin@example.com","password":"password"}
//! POST /api/logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::LoginCredentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldLocation, rejection_error};

pub(crate) const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub(crate) const LOGOUT_SUCCESS_MESSAGE: &str = "Logout successful";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    user_id: String,
}

/// Authenticate a user and establish a session.
///
/// Unknown emails and wrong passwords share one `404` response and leave the
/// session untouched.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = crate::inbound::http::schemas::LoginRequestSchema,
    responses(
        (status = 200, description = "Login success", body = crate::inbound::http::schemas::LoginEnvelopeSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing email or password", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Invalid email or password", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_fields(&*payload)
        .map_err(|rejection| rejection_error(&rejection, FieldLocation::Body))?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(Envelope::with_message(
        LOGIN_SUCCESS_MESSAGE,
        LoginData {
            user_id: user_id.to_string(),
        },
    )
    .respond(StatusCode::OK))
}

/// End the current session.
///
/// Always succeeds; a logout activity is recorded only when a user was
/// logged in.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cleared", body = crate::inbound::http::schemas::MessageEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let user_id = session.user_id().unwrap_or_else(|error| {
        warn!(%error, "discarding unreadable session during logout");
        None
    });
    state.login.record_logout(user_id);
    session.purge();
    Envelope::message(LOGOUT_SUCCESS_MESSAGE).respond(StatusCode::OK)
}
