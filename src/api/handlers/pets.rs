//! Pet catalog endpoints (admin CRUD plus the public listing).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::pet,
    entities::pet as pet_entity,
};

use super::MessageResponse;

/// Body for `POST /api/pets`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePetRequest {
    /// Pet name; must be non-empty
    pub name: String,
    /// Breed description; must be non-empty
    pub breed: String,
    /// Age in years; non-negative
    pub age: i32,
    /// Optional free-form description
    #[serde(default)]
    pub description: String,
    /// Stored image reference; must be non-empty
    pub image: String,
    /// User listing the pet, if any
    #[serde(default)]
    pub owner_user_id: Option<i64>,
}

/// Body for `PUT /api/pets/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePetRequest {
    /// Pet name; must be non-empty
    pub name: String,
    /// Breed description; must be non-empty
    pub breed: String,
    /// Age in years; non-negative
    pub age: i32,
    /// Optional free-form description
    #[serde(default)]
    pub description: String,
    /// Stored image reference; must be non-empty
    pub image: String,
}

/// Query for `GET /api/pets`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListPetsQuery {
    /// When true, only pets currently available for adoption
    #[serde(default)]
    pub available: bool,
}

/// `POST /api/pets` - create a pet listing (201).
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreatePetRequest>,
) -> Result<(StatusCode, Json<pet_entity::Model>), ApiError> {
    let created = pet::create_pet(
        &state.db,
        body.name,
        body.breed,
        body.age,
        body.description,
        body.image,
        body.owner_user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/pets[?available=true]` - list pets (200).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPetsQuery>,
) -> Result<Json<Vec<pet_entity::Model>>, ApiError> {
    Ok(Json(pet::list_pets(&state.db, query.available).await?))
}

/// `GET /api/pets/:id` - one pet (200).
pub async fn get(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<Json<pet_entity::Model>, ApiError> {
    Ok(Json(pet::get_pet(&state.db, pet_id).await?))
}

/// `PUT /api/pets/:id` - update a pet's descriptive fields (200).
pub async fn update(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
    ApiJson(body): ApiJson<UpdatePetRequest>,
) -> Result<Json<pet_entity::Model>, ApiError> {
    let updated = pet::update_pet(
        &state.db,
        pet_id,
        body.name,
        body.breed,
        body.age,
        body.description,
        body.image,
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /api/pets/:id` - remove a pet from the catalog (200).
pub async fn remove(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    pet::delete_pet(&state.db, pet_id).await?;
    Ok(Json(MessageResponse {
        message: "Pet deleted successfully".to_string(),
    }))
}
