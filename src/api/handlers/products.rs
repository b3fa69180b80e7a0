//! Product catalog endpoints (admin CRUD).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::product,
    entities::product as product_entity,
};

use super::MessageResponse;

/// Body for `POST /api/products` and `PUT /api/products/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductBody {
    /// Product name; must be non-empty
    pub name: String,
    /// Unit price; non-negative
    pub price: f64,
    /// Optional free-form description
    #[serde(default)]
    pub description: String,
    /// Stored image reference; must be non-empty
    pub image: String,
    /// Units on hand; non-negative
    pub quantity: i64,
}

/// `POST /api/products` - create a product (201).
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductBody>,
) -> Result<(StatusCode, Json<product_entity::Model>), ApiError> {
    let created = product::create_product(
        &state.db,
        body.name,
        body.price,
        body.description,
        body.image,
        body.quantity,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/products` - all products (200).
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<product_entity::Model>>, ApiError> {
    Ok(Json(product::list_products(&state.db).await?))
}

/// `GET /api/products/:id` - one product (200).
pub async fn get(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<product_entity::Model>, ApiError> {
    Ok(Json(product::get_product(&state.db, product_id).await?))
}

/// `PUT /api/products/:id` - update a product (200).
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    ApiJson(body): ApiJson<ProductBody>,
) -> Result<Json<product_entity::Model>, ApiError> {
    let updated = product::update_product(
        &state.db,
        product_id,
        body.name,
        body.price,
        body.description,
        body.image,
        body.quantity,
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /api/products/:id` - delete a product not referenced by any
/// order or cart line (200; 400 when referenced).
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    product::delete_product(&state.db, product_id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
