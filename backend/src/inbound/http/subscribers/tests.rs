//! Handler coverage for subscriber CRUD behind the session gate.

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use tokio::sync::mpsc::Receiver;

use super::*;
use crate::domain::ports::{
    FixtureLoginService, InMemorySubscriberRepository, MockSubscribersCommand,
    MockSubscribersQuery, SubscribersCommand, SubscribersQuery,
};
use crate::domain::{
    Error, SideEffect, SideEffectDispatcher, SideEffectJob, SubscriberService, WELCOME_SUBJECT,
};
use crate::inbound::http::auth::login;
use crate::inbound::http::test_utils::test_session_middleware;
use crate::inbound::http::validation::json_config;

const MISSING_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn test_app(
    query: Arc<dyn SubscribersQuery>,
    command: Arc<dyn SubscribersCommand>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(FixtureLoginService), query, command);
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .service(login)
                .service(list_subscribers)
                .service(get_subscriber)
                .service(create_subscriber)
                .service(update_subscriber)
                .service(delete_subscriber),
        )
}

fn in_memory_service() -> (
    Arc<SubscriberService<InMemorySubscriberRepository>>,
    Receiver<SideEffectJob>,
) {
    let (dispatcher, jobs) = SideEffectDispatcher::channel(8);
    let service = SubscriberService::new(
        Arc::new(InMemorySubscriberRepository::default()),
        dispatcher,
    );
    (Arc::new(service), jobs)
}

async fn login_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": "admin@example.com", "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

fn valid_body() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subs_date": "2024-01-01",
        "description": "Monthly digest",
        "role": "admin"
    })
}

#[rstest]
#[case(Method::GET, "/api/subscribers")]
#[case(Method::GET, "/api/subscribers/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case(Method::POST, "/api/subscribers")]
#[case(Method::PATCH, "/api/subscribers/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case(Method::DELETE, "/api/subscribers/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[actix_web::test]
async fn anonymous_requests_never_reach_the_ports(#[case] method: Method, #[case] uri: &str) {
    // Mocks without expectations panic on any call.
    let app = actix_test::init_service(test_app(
        Arc::new(MockSubscribersQuery::new()),
        Arc::new(MockSubscribersCommand::new()),
    ))
    .await;
    let request = actix_test::TestRequest::default()
        .method(method)
        .uri(uri)
        .set_json(valid_body())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = actix_test::read_body(response).await;
    assert_eq!(body, "Unauthorized");
}

#[actix_web::test]
async fn create_stores_whitelisted_fields_and_queues_welcome_email() {
    let (service, mut jobs) = in_memory_service();
    let app = actix_test::init_service(test_app(service.clone(), service)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/subscribers")
            .cookie(cookie.clone())
            .set_json(valid_body())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], json!(true));
    assert_eq!(body["message"], json!("Subscriber created"));
    assert_eq!(body["data"]["subs_date"], json!("2024-01-01"));
    assert!(body["data"].get("role").is_none());

    let job = jobs.try_recv().expect("welcome email queued");
    match job.effect() {
        SideEffect::SendWelcomeEmail(email) => {
            assert_eq!(email.recipient(), "ada@example.com");
            assert_eq!(email.subject(), WELCOME_SUBJECT);
        }
        other => panic!("unexpected side effect: {other:?}"),
    }

    let id = body["data"]["id"].as_str().expect("id").to_owned();
    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/subscribers/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(fetched["data"], body["data"]);
}

#[actix_web::test]
async fn create_reports_every_failing_field_and_writes_nothing() {
    let mut command = MockSubscribersCommand::new();
    command.expect_create().times(0);
    let app = actix_test::init_service(test_app(
        Arc::new(MockSubscribersQuery::new()),
        Arc::new(command),
    ))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/subscribers")
            .cookie(cookie)
            .set_json(json!({ "email": "not-an-email", "subs_date": "2024/01/01" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "status": false,
            "message": [
                { "field": "name", "message": "Name is required", "location": "body" },
                { "field": "email", "message": "Email is not valid", "location": "body" },
                { "field": "subs_date", "message": "Invalid date format. Use YYYY-MM-DD format", "location": "body" },
                { "field": "description", "message": "Description is required", "location": "body" }
            ]
        })
    );
}

#[actix_web::test]
async fn overlong_names_are_bad_requests_not_store_errors() {
    let mut command = MockSubscribersCommand::new();
    command.expect_create().times(0);
    let app = actix_test::init_service(test_app(
        Arc::new(MockSubscribersQuery::new()),
        Arc::new(command),
    ))
    .await;
    let cookie = login_cookie(&app).await;
    let mut body = valid_body();
    body["name"] = json!("x".repeat(300));

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/subscribers")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        json!([{
            "field": "name",
            "message": "Name must be at most 255 characters",
            "location": "body"
        }])
    );
}

#[actix_web::test]
async fn list_returns_subscribers_in_name_order() {
    let (service, _jobs) = in_memory_service();
    for name in ["Zed", "Ada"] {
        let mut body = valid_body();
        body["name"] = json!(name);
        let source = body.as_object().expect("object").clone();
        let draft = NewSubscriber::try_from_fields(&source).expect("valid draft");
        service.create(draft).await.expect("created");
    }
    let app = actix_test::init_service(test_app(service.clone(), service)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/subscribers")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|subscriber| subscriber["name"].as_str())
        .collect();
    assert_eq!(names, ["Ada", "Zed"]);
}

#[actix_web::test]
async fn patch_updates_only_present_fields() {
    let (service, _jobs) = in_memory_service();
    let draft = NewSubscriber::try_from_fields(valid_body().as_object().expect("object"))
        .expect("valid draft");
    let created = service.create(draft).await.expect("created");
    let app = actix_test::init_service(test_app(service.clone(), service)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/subscribers/{}", created.id()))
            .cookie(cookie)
            .set_json(json!({ "description": "Weekly digest" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"]["description"], json!("Weekly digest"));
    assert_eq!(body["data"]["name"], json!("Ada Lovelace"));
}

#[rstest]
#[case(json!({}), "body", "At least one of name, email, subs_date or description is required")]
#[case(json!({ "email": "nope" }), "email", "Email is not valid")]
#[case(json!({ "subs_date": null }), "subs_date", "Subs Date is required")]
#[actix_web::test]
async fn patch_rejects_invalid_bodies(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    let mut command = MockSubscribersCommand::new();
    command.expect_update().times(0);
    let app = actix_test::init_service(test_app(
        Arc::new(MockSubscribersQuery::new()),
        Arc::new(command),
    ))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/subscribers/{MISSING_ID}"))
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        json!([{ "field": field, "message": message, "location": "body" }])
    );
}

#[rstest]
#[case(Method::GET)]
#[case(Method::DELETE)]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] method: Method) {
    let (service, _jobs) = in_memory_service();
    let app = actix_test::init_service(test_app(service.clone(), service)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::default()
            .method(method)
            .uri(&format!("/api/subscribers/{MISSING_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": false, "message": "Subscriber not found" })
    );
}

#[actix_web::test]
async fn malformed_ids_are_bad_requests() {
    let app = actix_test::init_service(test_app(
        Arc::new(MockSubscribersQuery::new()),
        Arc::new(MockSubscribersCommand::new()),
    ))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/subscribers/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"][0]["location"], json!("params"));
}

#[actix_web::test]
async fn delete_confirms_removal() {
    let (service, _jobs) = in_memory_service();
    let draft = NewSubscriber::try_from_fields(valid_body().as_object().expect("object"))
        .expect("valid draft");
    let created = service.create(draft).await.expect("created");
    let app = actix_test::init_service(test_app(service.clone(), service)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/subscribers/{}", created.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": true, "message": "Subscriber deleted" })
    );
}

#[actix_web::test]
async fn port_failures_are_redacted() {
    let mut query = MockSubscribersQuery::new();
    query
        .expect_list()
        .times(1)
        .returning(|| Err(Error::internal("subscribers.list: connection refused")));
    let app = actix_test::init_service(test_app(
        Arc::new(query),
        Arc::new(MockSubscribersCommand::new()),
    ))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/subscribers")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": false, "message": "Internal server error" })
    );
}
