//! License allocation handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{error, warn};
use validator::Validate;

use broker_allocator::AllocationOutcome;
use broker_core::error::AppError;
use broker_core::types::id::ClientId;

use crate::dto::request::LicenseRequest;
use crate::dto::response::AllocationResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Validate the body and resolve the client id and fleet name.
fn parse_request(
    state: &AppState,
    body: Result<Json<LicenseRequest>, JsonRejection>,
) -> Result<(ClientId, String), ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let client = ClientId::parse(request.client_id)?;
    let fleet = request
        .fleet_name
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| state.config.fleet.default_fleet.clone());

    if fleet.is_empty() {
        return Err(AppError::validation("fleet_name is required").into());
    }

    Ok((client, fleet))
}

/// POST /api/v1/licenses/allocate
///
/// 200 with the license locator, 404 when the client is not a fleet member
/// or the pool has nothing left, 500 when a dependency fails.
pub async fn allocate(
    State(state): State<AppState>,
    body: Result<Json<LicenseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AllocationResponse>), ApiError> {
    let (client, fleet) = parse_request(&state, body)?;

    match state.authorizer.is_authorized(&client, &fleet).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(client = %client, fleet = %fleet, "Allocation refused, client not in fleet");
            return Ok((StatusCode::NOT_FOUND, Json(AllocationResponse::not_found())));
        }
        Err(e) => {
            error!(client = %client, fleet = %fleet, error = %e, "Membership check failed");
            return Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AllocationResponse::error()),
            ));
        }
    }

    let response = match state.allocator.assign_or_retrieve(&client).await {
        AllocationOutcome::Assigned(grant) => (
            StatusCode::OK,
            Json(AllocationResponse::assigned(
                state.allocator.locator(&grant.resource),
            )),
        ),
        AllocationOutcome::Exhausted(_) => {
            (StatusCode::NOT_FOUND, Json(AllocationResponse::not_found()))
        }
        AllocationOutcome::Failed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AllocationResponse::error()),
        ),
    };

    Ok(response)
}

/// POST /api/v1/licenses/release
pub async fn release(
    State(state): State<AppState>,
    body: Result<Json<LicenseRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let (client, _fleet) = parse_request(&state, body)?;
    state.allocator.release(&client).await?;
    Ok(StatusCode::NO_CONTENT)
}
