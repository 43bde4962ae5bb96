//! Integration tests for the allocate and release endpoints.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use broker_core::error::AppError;
use broker_core::result::AppResult;
use broker_core::traits::FleetDirectory;
use broker_core::types::id::ClientId;
use broker_store::MemoryAssignmentStore;
use helpers::{TestApp, location};

#[tokio::test]
async fn test_members_get_distinct_licenses_until_exhausted() {
    let app = TestApp::new(&["lic1.lic", "lic2.lic"], &["i-1", "i-2", "i-3"]);

    let first = app.allocate("i-1").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["status"], "assigned");
    assert_eq!(first.body["resource_location"], location("lic1.lic"));

    let second = app.allocate("i-2").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["resource_location"], location("lic2.lic"));

    let third = app.allocate("i-3").await;
    assert_eq!(third.status, StatusCode::NOT_FOUND);
    assert_eq!(third.body["status"], "not_found");
    assert!(third.body["resource_location"].is_null());
}

#[tokio::test]
async fn test_repeat_allocation_returns_same_license() {
    let app = TestApp::new(&["lic1.lic", "lic2.lic"], &["i-1", "i-2"]);

    let first = app.allocate("i-2").await;
    let again = app.allocate("i-2").await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(first.body["resource_location"], again.body["resource_location"]);
}

#[tokio::test]
async fn test_instance_field_is_accepted() {
    let app = TestApp::new(&["lic1.lic"], &["i-0abc"]);

    let response = app
        .request(
            "POST",
            "/api/v1/licenses/allocate",
            Some(json!({ "instance": "i-0abc", "fleet_name": "byol-asg" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["resource_location"], location("lic1.lic"));
}

#[tokio::test]
async fn test_non_member_gets_not_found() {
    let app = TestApp::new(&["lic1.lic"], &["i-1"]);

    let response = app.allocate("i-intruder").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], "not_found");

    // The license is still free for a real member.
    let member = app.allocate("i-1").await;
    assert_eq!(member.body["resource_location"], location("lic1.lic"));
}

#[tokio::test]
async fn test_unknown_fleet_gets_not_found() {
    let app = TestApp::new(&["lic1.lic"], &["i-1"]);

    let response = app
        .request(
            "POST",
            "/api/v1/licenses/allocate",
            Some(json!({ "client_id": "i-1", "fleet_name": "other-asg" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_pool_gets_not_found() {
    let app = TestApp::new(&[], &["i-1"]);

    let response = app.allocate("i-1").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], "not_found");
}

#[tokio::test]
async fn test_corrupt_record_is_server_error() {
    let store = Arc::new(MemoryAssignmentStore::with_members(["i-9", "lic1.lic"]));
    let app = TestApp::with_store(store, &["lic1.lic"], &["i-1"]);

    let response = app.allocate("i-1").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["status"], "error");
    assert!(response.body["resource_location"].is_null());
}

/// Directory whose membership service is always down.
#[derive(Debug)]
struct UnreachableDirectory;

#[async_trait]
impl FleetDirectory for UnreachableDirectory {
    fn directory_type(&self) -> &str {
        "unreachable"
    }

    async fn members(&self, _fleet: &str) -> AppResult<Vec<ClientId>> {
        Err(AppError::authority_unavailable("membership service timed out"))
    }
}

#[tokio::test]
async fn test_membership_outage_is_server_error() {
    let app = TestApp::with_directory(Arc::new(UnreachableDirectory), &["lic1.lic"]);

    let response = app.allocate("i-1").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["status"], "error");
    assert!(response.body["resource_location"].is_null());
}

#[tokio::test]
async fn test_catalog_outage_is_server_error() {
    let app = TestApp::new(&["lic1.lic"], &["i-1"]);
    // A file where the pool directory should be makes every listing fail.
    std::fs::remove_dir_all(app.catalog_root.path().join("deploy")).unwrap();
    std::fs::write(app.catalog_root.path().join("deploy"), b"not a directory").unwrap();

    let response = app.allocate("i-1").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["status"], "error");
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() {
    let app = TestApp::new(&["lic1.lic"], &["i-1"]);

    let missing = app
        .request("POST", "/api/v1/licenses/allocate", Some(json!({ "fleet_name": "byol-asg" })))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let blank = app.allocate("   ").await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let too_long = app.allocate(&"i".repeat(300)).await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let separator = app.allocate("i-1=|pair|=x").await;
    assert_eq!(separator.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_release_is_accepted() {
    let app = TestApp::new(&["lic1.lic"], &["i-1"]);
    app.allocate("i-1").await;

    let response = app
        .request(
            "POST",
            "/api/v1/licenses/release",
            Some(json!({ "client_id": "i-1" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    // Assignments are permanent.
    let again = app.allocate("i-1").await;
    assert_eq!(again.body["resource_location"], location("lic1.lic"));
}
