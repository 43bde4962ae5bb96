//! Directory backed by a remote membership service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, error, warn};

use broker_core::config::fleet::HttpDirectoryConfig;
use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_core::traits::fleet::FleetDirectory;
use broker_core::types::id::ClientId;

/// Response body of `GET /fleets/{fleet}/members`.
#[derive(Debug, Deserialize)]
struct MembersResponse {
    members: Vec<String>,
}

/// Fleet directory that asks an HTTP service for current membership.
///
/// Every call goes to the service; nothing is cached, so membership
/// changes take effect on the next request.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Create a directory client from configuration.
    pub fn new(config: &HttpDirectoryConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid membership service URL '{}'", config.base_url),
                e,
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Membership service URL '{base_url}' cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self { client, base_url })
    }

    /// `{base_url}/fleets/{fleet}/members`, with the fleet name encoded as a
    /// single path segment.
    fn members_url(&self, fleet: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["fleets", fleet, "members"]);
        }
        url
    }
}

#[async_trait]
impl FleetDirectory for HttpDirectory {
    fn directory_type(&self) -> &str {
        "http"
    }

    async fn members(&self, fleet: &str) -> AppResult<Vec<ClientId>> {
        // Dot segments are dropped when the URL is built, so they would name
        // a different resource.
        if fleet == "." || fleet == ".." {
            debug!(fleet = %fleet, "Fleet name is a dot segment, no members");
            return Ok(Vec::new());
        }

        let url = self.members_url(fleet);
        debug!(url = %url, "Fetching fleet members");

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::AuthorityUnavailable,
                format!("Membership service unreachable: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(fleet = %fleet, "Fleet not known to membership service");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, fleet = %fleet, "Membership query failed");
            return Err(AppError::authority_unavailable(format!(
                "Membership service returned {status}"
            )));
        }

        let payload: MembersResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::AuthorityUnavailable,
                format!("Invalid membership response: {e}"),
                e,
            )
        })?;

        let members = payload
            .members
            .into_iter()
            .filter_map(|raw| match ClientId::parse(raw.as_str()) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(fleet = %fleet, member = %raw, error = %e, "Ignoring invalid member id");
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(fleet = %fleet, count = members.len(), "Fetched fleet members");
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;

    async fn members(Path(fleet): Path<String>) -> Response {
        match fleet.as_str() {
            "byol-asg" => axum::Json(serde_json::json!({ "members": ["i-1", "i-2"] }))
                .into_response(),
            "web/../broken?x" => axum::Json(serde_json::json!({ "members": ["i-9"] }))
                .into_response(),
            "broken" => AxumStatus::INTERNAL_SERVER_ERROR.into_response(),
            "garbled" => "not json".into_response(),
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_service() -> String {
        let app = Router::new().route("/fleets/{fleet}/members", get(members));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn directory(base_url: String) -> HttpDirectory {
        HttpDirectory::new(&HttpDirectoryConfig {
            base_url,
            timeout_ms: 2000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_members() {
        let directory = directory(spawn_service().await);
        let members = directory.members("byol-asg").await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].as_str(), "i-1");
    }

    #[tokio::test]
    async fn test_unknown_fleet_is_empty() {
        let directory = directory(spawn_service().await);
        assert!(directory.members("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_authority_unavailable() {
        let directory = directory(spawn_service().await);
        let err = directory.members("broken").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorityUnavailable);
    }

    #[tokio::test]
    async fn test_bad_payload_is_authority_unavailable() {
        let directory = directory(spawn_service().await);
        let err = directory.members("garbled").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorityUnavailable);
    }

    #[tokio::test]
    async fn test_fleet_name_is_one_path_segment() {
        let directory = directory(spawn_service().await);
        let members = directory.members("web/../broken?x").await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].as_str(), "i-9");

        assert!(directory.members("..").await.unwrap().is_empty());
    }

    #[test]
    fn test_members_url_keeps_base_path() {
        let directory = directory("http://membership.local/api/".to_string());
        assert_eq!(
            directory.members_url("byol asg").as_str(),
            "http://membership.local/api/fleets/byol%20asg/members"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = HttpDirectory::new(&HttpDirectoryConfig {
            base_url: "not a url".to_string(),
            timeout_ms: 2000,
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
