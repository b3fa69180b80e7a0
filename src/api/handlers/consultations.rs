//! Vet consultation endpoints: create, list, set status.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::consultation,
    entities::vet_consultation,
};

/// Body for `POST /api/vet-consultations`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateConsultationRequest {
    /// Requesting user
    pub user_id: i64,
    /// Target veterinarian, if one was requested
    #[serde(default)]
    pub vet_id: Option<i64>,
    /// Requested appointment date/time (RFC 3339)
    pub requested_date: DateTime<Utc>,
}

/// Body for `PUT /api/vet-consultations/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateConsultationStatusRequest {
    /// Target status value
    pub status: String,
}

/// `POST /api/vet-consultations` - request a consultation (201).
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<vet_consultation::Model>), ApiError> {
    let created = consultation::create_consultation(
        &state.db,
        body.user_id,
        body.vet_id,
        body.requested_date,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/vet-consultations` - all consultation requests (200).
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<vet_consultation::Model>>, ApiError> {
    Ok(Json(consultation::list_consultations(&state.db).await?))
}

/// `PUT /api/vet-consultations/:id` - set the consultation status (200).
pub async fn set_status(
    State(state): State<AppState>,
    Path(consultation_id): Path<i64>,
    ApiJson(body): ApiJson<UpdateConsultationStatusRequest>,
) -> Result<Json<vet_consultation::Model>, ApiError> {
    let updated =
        consultation::set_consultation_status(&state.db, consultation_id, &body.status).await?;
    Ok(Json(updated))
}
