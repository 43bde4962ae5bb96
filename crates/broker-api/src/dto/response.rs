//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Result of an allocation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationResponse {
    /// `"assigned"`, `"not_found"` or `"error"`.
    pub status: String,
    /// Locator of the granted license file, e.g. `s3://bucket/key`.
    pub resource_location: Option<String>,
}

impl AllocationResponse {
    /// A license was granted at `location`.
    pub fn assigned(location: String) -> Self {
        Self {
            status: "assigned".to_string(),
            resource_location: Some(location),
        }
    }

    /// No license for this client.
    pub fn not_found() -> Self {
        Self {
            status: "not_found".to_string(),
            resource_location: None,
        }
    }

    /// Allocation could not be completed.
    pub fn error() -> Self {
        Self {
            status: "error".to_string(),
            resource_location: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Assignment store state.
    pub store: String,
}
