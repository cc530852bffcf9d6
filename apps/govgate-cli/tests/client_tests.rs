//! Integration tests for the authenticated HTTP client
//!
//! Tests cover:
//! - Role-scoped URLs and bearer headers
//! - One refresh and replay on 401
//! - Session expiry when the refresh is rejected
//! - Error classification (404, 403, validation bodies, HTML pages)

mod common;

use common::{
    bearer, citizen_fixture, request_fixture, TestContext, ACCESS_TOKEN, REFRESH_TOKEN,
};
use govgate_cli::api::resource;
use govgate_cli::error::CliError;
use govgate_core::models::{Citizen, Department, Request};
use govgate_core::Role;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_uses_role_path_and_bearer() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/grantee/request/"))
        .and(header("Authorization", bearer(ACCESS_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([request_fixture(id, "Parking", json!({}))])),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    let requests = resource::list::<Request>(&client).await.unwrap();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].subject, "Parking");
    assert_eq!(requests[0].service_label(), "Parking permits");
}

#[tokio::test]
async fn test_paginated_envelope_is_unwrapped() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/department/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{
                "id": Uuid::new_v4().to_string(),
                "Title": "Transport",
                "Description": "Roads and parking",
                "Email": "transport@gov.example",
                "Telephone": "555-0100",
            }],
        })))
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Admin);
    let departments = resource::list::<Department>(&client).await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].title, "Transport");
}

#[tokio::test]
async fn test_citizen_active_flag_uses_snake_case_key() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/grantee/citizen/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            citizen_fixture("jane", true),
            citizen_fixture("john", false),
        ])))
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    let citizens = resource::list::<Citizen>(&client).await.unwrap();
    assert_eq!(citizens.len(), 2);
    assert!(citizens[0].is_active);
    assert!(!citizens[1].is_active);
}

#[tokio::test]
async fn test_missing_credentials_is_not_authenticated() {
    let ctx = TestContext::new().await;
    let client = ctx.anonymous_client(Role::Citizen);

    let result = resource::list::<Request>(&client).await;
    assert!(matches!(result, Err(CliError::NotAuthenticated)));
}

#[tokio::test]
async fn test_401_refreshes_once_and_replays() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/citizen/request/"))
        .and(header("Authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .and(body_json(json!({"refresh": REFRESH_TOKEN})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh-token"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/citizen/request/"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.store_credentials("stale-token");
    let client = ctx.anonymous_client(Role::Citizen);
    let requests = resource::list::<Request>(&client).await.unwrap();
    assert!(requests.is_empty());

    let stored = ctx.stored_credentials().unwrap();
    assert_eq!(stored.access_token, "fresh-token");
    // No rotation in the response keeps the old refresh token
    assert_eq!(stored.refresh_token, REFRESH_TOKEN);
}

#[tokio::test]
async fn test_rejected_refresh_expires_session() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted"
        })))
        .mount(&ctx.server)
        .await;

    // Already past the refresh window, so the client refreshes up front
    ctx.store_credentials_expiring("old-token", chrono::Utc::now() - chrono::Duration::minutes(1));
    let client = ctx.anonymous_client(Role::Citizen);

    let result = resource::list::<Request>(&client).await;
    assert!(matches!(result, Err(CliError::SessionExpired)));
    assert!(ctx.stored_credentials().is_none());
}

#[tokio::test]
async fn test_not_found_names_the_record() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/citizen/request/{id}/")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    match resource::get::<Request>(&client, id).await {
        Err(CliError::NotFound(what)) => assert_eq!(what, format!("request {id}")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_keeps_server_detail() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/grantee/department/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You do not have permission to perform this action."
        })))
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    match resource::list::<Department>(&client).await {
        Err(CliError::Forbidden(message)) => {
            assert_eq!(message, "You do not have permission to perform this action.")
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_body_reports_first_field_error() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/citizen/request/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Subject": ["This field may not be blank."]
        })))
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let result = resource::create::<Request, _>(&client, &json!({"Subject": "x"})).await;
    match result {
        Err(CliError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("This field may not be blank."), "{message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_html_page_is_not_parsed_as_json() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/citizen/request/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string("<!DOCTYPE html><html><body>Sign in</body></html>"),
        )
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let result = resource::list::<Request>(&client).await;
    assert!(matches!(result, Err(CliError::UnexpectedHtml { status: 200 })));
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/admin/department/{id}/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Admin);
    resource::delete::<Department>(&client, id).await.unwrap();
}
