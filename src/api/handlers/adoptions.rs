//! Adoption request endpoints: create, list, resolve.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::adoption,
    entities::{adoption_request, pet},
};

/// Body for `POST /api/adoption-requests`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAdoptionRequest {
    /// Pet being requested
    pub pet_id: i64,
    /// Requesting user
    pub user_id: i64,
    /// Message to the approver; must be non-empty
    pub message: String,
}

/// Body for `PUT /api/adoption-requests/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveAdoptionRequest {
    /// Terminal decision: `"Approved"` or `"Rejected"`
    pub status: String,
}

/// A request joined with its pet, as returned to clients.
#[derive(Debug, Serialize)]
pub struct AdoptionRequestResponse {
    /// The request record
    #[serde(flatten)]
    pub request: adoption_request::Model,
    /// The pet the request is for
    pub pet: pet::Model,
}

/// `POST /api/adoption-requests` - request adoption of an available pet
/// (201). The pet is hidden from further requests immediately.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAdoptionRequest>,
) -> Result<(StatusCode, Json<adoption_request::Model>), ApiError> {
    let request =
        adoption::create_request(&state.db, body.pet_id, body.user_id, body.message).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// `GET /api/adoption-requests` - all requests with pet details (200).
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdoptionRequestResponse>>, ApiError> {
    let requests = adoption::list_requests(&state.db).await?;
    Ok(Json(
        requests
            .into_iter()
            .map(|detail| AdoptionRequestResponse {
                request: detail.request,
                pet: detail.pet,
            })
            .collect(),
    ))
}

/// `PUT /api/adoption-requests/:id` - resolve a request (200). Returns the
/// removed request with the applied decision in its status field.
pub async fn resolve(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    ApiJson(body): ApiJson<ResolveAdoptionRequest>,
) -> Result<Json<adoption_request::Model>, ApiError> {
    let resolved = adoption::resolve_request(&state.db, request_id, &body.status).await?;
    Ok(Json(resolved))
}
