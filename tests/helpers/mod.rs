//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use broker_allocator::LicenseAllocator;
use broker_api::AppState;
use broker_catalog::CatalogReader;
use broker_catalog::providers::LocalLister;
use broker_core::config::{AllocatorConfig, BrokerConfig};
use broker_core::traits::{AssignmentStore, FleetDirectory};
use broker_fleet::MembershipAuthorizer;
use broker_fleet::directories::StaticDirectory;
use broker_store::MemoryAssignmentStore;

/// Fleet every test app knows about.
pub const FLEET: &str = "byol-asg";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory standing in for the license bucket
    pub catalog_root: TempDir,
}

/// Parsed response
pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

impl TestApp {
    /// App with an empty in-memory record, the given license files and fleet members.
    pub fn new(licenses: &[&str], members: &[&str]) -> Self {
        Self::with_store(Arc::new(MemoryAssignmentStore::new()), licenses, members)
    }

    /// App over an explicit assignment store.
    pub fn with_store(
        store: Arc<dyn AssignmentStore>,
        licenses: &[&str],
        members: &[&str],
    ) -> Self {
        Self::build(store, None, licenses, members)
    }

    /// App whose membership checks go to an explicit fleet directory.
    pub fn with_directory(directory: Arc<dyn FleetDirectory>, licenses: &[&str]) -> Self {
        Self::build(
            Arc::new(MemoryAssignmentStore::new()),
            Some(directory),
            licenses,
            &[],
        )
    }

    fn build(
        store: Arc<dyn AssignmentStore>,
        directory: Option<Arc<dyn FleetDirectory>>,
        licenses: &[&str],
        members: &[&str],
    ) -> Self {
        let catalog_root = tempfile::tempdir().expect("Failed to create catalog dir");
        for name in licenses {
            write_license(catalog_root.path(), name);
        }

        let mut config = BrokerConfig::default();
        config.catalog.prefix = "deploy".to_string();
        config.catalog.local.root_path = catalog_root.path().display().to_string();
        config.fleet.default_fleet = FLEET.to_string();
        config.fleet.static_fleets = HashMap::from([(
            FLEET.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        )]);
        config.catalog.retry.max_attempts = 1;
        config.allocator = AllocatorConfig {
            contention_delay_ms: 0,
            request_timeout_ms: 5_000,
        };

        let lister = Arc::new(LocalLister::new(catalog_root.path()));
        let catalog = Arc::new(CatalogReader::from_config(lister, &config.catalog));
        let allocator = LicenseAllocator::new(
            store,
            catalog,
            config.catalog.pool_location(),
            config.allocator.clone(),
        );
        let directory = directory
            .unwrap_or_else(|| Arc::new(StaticDirectory::new(&config.fleet.static_fleets)));
        let authorizer = MembershipAuthorizer::new(directory);

        let state = AppState::new(config, allocator, authorizer);
        Self {
            router: broker_api::build_router(state),
            catalog_root,
        }
    }

    /// Send a request through the router
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let req = match body {
            Some(json) => builder.body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            request_id,
            body,
        }
    }

    /// POST /api/v1/licenses/allocate for a client in the default fleet
    pub async fn allocate(&self, client: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/licenses/allocate",
            Some(serde_json::json!({ "client_id": client })),
        )
        .await
    }
}

fn write_license(root: &Path, name: &str) {
    let path = root.join("deploy/license").join(name);
    std::fs::create_dir_all(path.parent().expect("license path has a parent"))
        .expect("Failed to create license dir");
    std::fs::write(path, b"FEATURE demo").expect("Failed to write license");
}

/// Locator the broker hands out for a license file in the test catalog.
pub fn location(name: &str) -> String {
    format!("file://licenses/deploy/license/{name}")
}
