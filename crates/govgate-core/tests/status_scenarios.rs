//! End-to-end status classification over backend-shaped payloads.

use chrono::{DateTime, TimeZone, Utc};
use govgate_core::models::{Grant, Request};
use govgate_core::{filter_by_query, filter_by_status, GrantStatus, StatusCounts};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
}

fn requests() -> Vec<Request> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "00000000000000000000000000000001",
            "Subject": "Library card",
            "Message": "New card",
            "Granted": false,
            "Decline": false
        },
        {
            "id": "00000000000000000000000000000002",
            "Subject": "Parking permit",
            "Message": "Residential zone B",
            "Granted": true,
            "Decline": false,
            "EndDate": "2099-01-01"
        },
        {
            "id": "00000000000000000000000000000003",
            "Subject": "Fishing licence",
            "Message": "Lake Kariba",
            "Granted": true,
            "Decline": false,
            "EndDate": "2000-01-01"
        },
        {
            "id": "00000000000000000000000000000004",
            "Subject": "Building permit",
            "Message": "Extension",
            "Granted": false,
            "Decline": true
        }
    ]))
    .unwrap()
}

#[test]
fn test_request_list_classifies_in_order() {
    let statuses: Vec<GrantStatus> = requests()
        .iter()
        .map(|request| GrantStatus::of(request, now()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            GrantStatus::Pending,
            GrantStatus::Active,
            GrantStatus::Expired,
            GrantStatus::Declined,
        ]
    );
}

#[test]
fn test_counts_over_scenario() {
    let counts = StatusCounts::tally(&requests(), now());
    assert_eq!(
        (counts.pending, counts.active, counts.expired, counts.declined),
        (1, 1, 1, 1)
    );
}

#[test]
fn test_search_then_status_filter() {
    let permits = filter_by_query(&requests(), "permit");
    assert_eq!(permits.len(), 2);
    let active = filter_by_status(&permits, GrantStatus::Active, now());
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].subject, "Parking permit");
    assert_eq!(filter_by_query(&permits, "permit").len(), permits.len());
}

#[test]
fn test_grants_from_grantee_serializer() {
    // Grantee endpoints omit Granted
    let grants: Vec<Grant> = serde_json::from_value(serde_json::json!([
        {"id": "00000000000000000000000000000011", "Decline": false},
        {"id": "00000000000000000000000000000012", "Decline": false,
         "StartDate": "2026-10-01T00:00:00", "EndDate": null},
        {"id": "00000000000000000000000000000013", "Decline": true,
         "StartDate": "2026-10-01T00:00:00"}
    ]))
    .unwrap();
    let statuses: Vec<GrantStatus> = grants.iter().map(|g| GrantStatus::of(g, now())).collect();
    assert_eq!(
        statuses,
        vec![GrantStatus::Pending, GrantStatus::Active, GrantStatus::Declined]
    );
}
