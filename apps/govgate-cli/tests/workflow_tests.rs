//! Integration tests for the request, grant, permission and log workflows
//!
//! Tests cover:
//! - Request detail retried on 404 right after creation
//! - Approve and reject action endpoints
//! - Grant decisions sent as partial updates
//! - Permission scope paths and window payloads
//! - Log access checked before any request is made
//! - Staff profile lookup through the role's own collection

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{grant_fixture, log_fixture, request_fixture, TestContext};
use govgate_cli::api::{self, RetryPolicy};
use govgate_cli::error::CliError;
use govgate_core::models::{
    DecisionPayload, GrantUpdate, LogKind, NewPermission, NewRequest, PermissionScope,
};
use govgate_core::{GrantStatus, PermissionWindow, Role};
use serde_json::json;
use std::time::Duration as StdDuration;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn fast_not_found_policy() -> RetryPolicy {
    RetryPolicy::not_found_detail().with_base_delay(StdDuration::from_millis(5))
}

#[tokio::test]
async fn test_create_request_trims_and_posts() {
    let ctx = TestContext::new().await;
    let service = Uuid::new_v4();
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/citizen/request/"))
        .and(body_partial_json(json!({
            "Subject": "Parking permit",
            "Message": "For my new address",
            "PublicService": service.to_string(),
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(request_fixture(id, "Parking permit", json!({}))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let request = NewRequest {
        subject: "  Parking permit ".to_string(),
        message: "For my new address\n".to_string(),
        public_service: Some(service),
        priority: None,
        category: None,
    };
    let created = api::create_request(&client, &request).await.unwrap();
    assert_eq!(created.subject, "Parking permit");
    assert_eq!(GrantStatus::of(&created, Utc::now()), GrantStatus::Pending);
}

#[tokio::test]
async fn test_create_request_without_subject_never_reaches_backend() {
    let ctx = TestContext::new().await;
    let client = ctx.client(Role::Citizen);

    let request = NewRequest {
        subject: "   ".to_string(),
        message: "Hello".to_string(),
        public_service: Some(Uuid::new_v4()),
        priority: None,
        category: None,
    };
    let result = api::create_request(&client, &request).await;
    assert!(matches!(result, Err(CliError::Validation(_))));
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_request_detail_retries_not_found() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();
    let detail = format!("/api/citizen/request/{id}/");

    Mock::given(method("GET"))
        .and(path(detail.as_str()))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path(detail.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(request_fixture(id, "Parking", json!({}))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let request = api::get_request_with_retry(&client, id, &fast_not_found_policy())
        .await
        .unwrap();
    assert_eq!(request.subject, "Parking");
}

#[tokio::test]
async fn test_request_detail_gives_up_after_three_retries() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/citizen/request/{id}/")))
        .respond_with(ResponseTemplate::new(404))
        .expect(4)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let result = api::get_request_with_retry(&client, id, &fast_not_found_policy()).await;
    assert!(matches!(result, Err(CliError::NotFound(_))));
}

#[tokio::test]
async fn test_request_detail_does_not_retry_forbidden() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/citizen/request/{id}/")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Not yours"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Citizen);
    let result = api::get_request_with_retry(&client, id, &fast_not_found_policy()).await;
    assert!(matches!(result, Err(CliError::Forbidden(_))));
}

#[tokio::test]
async fn test_approve_and_reject_use_action_routes() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/grantee/request/{id}/approve/")))
        .and(body_partial_json(json!({"Message": "Welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "approved"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/grantee/request/{id}/reject/")))
        .and(body_partial_json(json!({"Message": "Incomplete"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "rejected"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    let approved = api::approve(
        &client,
        id,
        &DecisionPayload {
            message: "Welcome".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(approved["status"], "approved");

    let rejected = api::reject(
        &client,
        id,
        &DecisionPayload {
            message: "Incomplete".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(rejected["status"], "rejected");
}

#[tokio::test]
async fn test_decline_grant_patches_decline_flag() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(format!("/api/grantee/grant/{id}/")))
        .and(body_partial_json(json!({"Decline": true, "Message": "Quota reached"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(grant_fixture(id, json!({"Decline": true}))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    let update = GrantUpdate::decline().with_message("Quota reached");
    let grant = api::decide_grant(&client, id, &update).await.unwrap();
    assert_eq!(GrantStatus::of(&grant, Utc::now()), GrantStatus::Declined);
}

#[tokio::test]
async fn test_grant_with_end_before_start_is_rejected_locally() {
    let ctx = TestContext::new().await;
    let client = ctx.client(Role::Grantee);

    let start = Utc.with_ymd_and_hms(2026, 10, 10, 0, 0, 0).unwrap();
    let update = GrantUpdate::approve(start, Some(start - Duration::days(1)));
    let result = api::decide_grant(&client, Uuid::new_v4(), &update).await;

    assert!(matches!(result, Err(CliError::Validation(_))));
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_permissions_use_scope_collection() {
    let ctx = TestContext::new().await;
    let service = Uuid::new_v4();
    let citizen = Uuid::new_v4();
    let created_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/admin/permission/service/"))
        .and(body_partial_json(json!({
            "Name": "Weekend access",
            "PublicService": service.to_string(),
            "Citizens": [citizen.to_string()],
            "Active": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": created_id.to_string(),
            "Name": "Weekend access",
            "PublicService": service.to_string(),
            "Citizens": [citizen.to_string()],
            "StartTime": "2026-10-17T00:00:00Z",
            "EndTime": "2026-10-19T00:00:00Z",
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Admin);
    let start = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
    let window = PermissionWindow::new(start, start + Duration::days(2)).unwrap();
    let permission = NewPermission::new(
        PermissionScope::Service,
        service,
        "Weekend access",
        "",
        window,
    )
    .with_citizens(vec![citizen]);

    let created = api::create_permission(&client, PermissionScope::Service, &permission)
        .await
        .unwrap();
    assert_eq!(created.scope(), Some(PermissionScope::Service));
    assert!(created.is_open(start + Duration::days(1)));
    assert!(!created.is_open(start + Duration::days(3)));
}

#[tokio::test]
async fn test_logs_forbidden_for_citizen_without_request() {
    let ctx = TestContext::new().await;
    let client = ctx.client(Role::Citizen);

    let result = api::list_logs(&client, LogKind::Citizen).await;
    assert!(matches!(result, Err(CliError::Forbidden(_))));
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_reads_grantee_log() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/log/grantee/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            log_fixture("2026-10-01T08:00:00Z"),
            log_fixture("2026-10-02T08:00:00Z"),
        ])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Admin);
    let entries = api::list_logs(&client, LogKind::Grantee).await.unwrap();
    assert_eq!(entries.len(), 2);

    let manager_only = api::list_logs(&client, LogKind::Manager).await;
    assert!(matches!(manager_only, Err(CliError::Forbidden(_))));
}

#[tokio::test]
async fn test_staff_profile_update_targets_own_record() {
    let ctx = TestContext::new().await;
    let own_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/grantee/grantee/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": own_id.to_string(),
            "GranteeUserName": "clerk1",
        }])))
        .mount(&ctx.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/grantee/grantee/{own_id}/")))
        .and(body_partial_json(json!({"GranteeUserName": "clerk2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": own_id.to_string(),
            "GranteeUserName": "clerk2",
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = ctx.client(Role::Grantee);
    let changes = api::parse_assignments(&["GranteeUserName=clerk2".to_string()]).unwrap();
    let updated = api::update_profile(&client, &changes).await.unwrap();
    assert_eq!(updated["GranteeUserName"], "clerk2");
}
