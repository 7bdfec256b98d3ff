//! Route table for the `/api` scope and the catch-all handler.

use actix_web::{HttpResponse, web};
use serde_json::json;

use super::auth::{login, logout};
use super::subscribers::{
    create_subscriber, delete_subscriber, get_subscriber, list_subscribers, update_subscriber,
};

pub(crate) const NOT_FOUND_MESSAGE: &str = "Where are we?";

/// Register every `/api` handler on `cfg`.
///
/// The caller owns the scope so it can attach the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use subscriber_api::inbound::http::routes::{api_routes, not_found};
///
/// let app = App::new()
///     .service(web::scope("/api").configure(api_routes))
///     .default_service(web::to(not_found));
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(list_subscribers)
        .service(get_subscriber)
        .service(create_subscriber)
        .service(update_subscriber)
        .service(delete_subscriber);
}

/// Response for any path no handler matches.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "status": 404, "message": NOT_FOUND_MESSAGE }))
}
