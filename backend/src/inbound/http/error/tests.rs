//! Envelope shapes produced for domain errors.

use super::*;
use actix_web::body::to_bytes;
use actix_web::web::Bytes;
use rstest::rstest;
use serde_json::json;

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Bytes) {
    let response = error.error_response();
    let status = response.status();
    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body()).await.expect("body bytes");
    (status, content_type, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_codes_follow_error_codes(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[actix_web::test]
async fn unauthorized_is_plain_text() {
    let (status, content_type, body) = body_of(&Error::unauthorized("login required")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
    assert_eq!(body.as_ref(), b"Unauthorized");
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let (_, _, body) = body_of(&Error::internal("database password rejected")).await;
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        value,
        json!({ "status": false, "message": "Internal server error" })
    );
}

#[actix_web::test]
async fn validation_failures_become_the_message() {
    let failures = json!([{ "field": "name", "message": "Name is required", "location": "body" }]);
    let error = Error::invalid_request("request validation failed").with_details(failures.clone());
    let (_, _, body) = body_of(&error).await;
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value, json!({ "status": false, "message": failures }));
}

#[actix_web::test]
async fn not_found_keeps_its_message() {
    let (_, _, body) = body_of(&Error::not_found("Subscriber not found")).await;
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        value,
        json!({ "status": false, "message": "Subscriber not found" })
    );
}

#[actix_web::test]
async fn trace_id_is_echoed_as_header() {
    let error = Error::not_found("missing").with_trace_id("00000000-0000-0000-0000-000000000000");
    let response = error.error_response();
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some("00000000-0000-0000-0000-000000000000")
    );
}
