//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the allocate and release endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LicenseRequest {
    /// Requesting instance id.
    #[serde(alias = "instance")]
    #[validate(length(min = 1, max = 256, message = "client_id must be 1-256 characters"))]
    pub client_id: String,
    /// Fleet the instance claims to belong to.
    #[serde(default)]
    pub fleet_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_alias() {
        let request: LicenseRequest =
            serde_json::from_str(r#"{"instance": "i-0abc"}"#).unwrap();
        assert_eq!(request.client_id, "i-0abc");
        assert!(request.fleet_name.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_client_rejected() {
        let request: LicenseRequest =
            serde_json::from_str(r#"{"client_id": "", "fleet_name": "byol"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
