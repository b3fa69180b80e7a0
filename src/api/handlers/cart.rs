//! Cart endpoints: add a line, list a user's cart, remove a line.

use axum::{Json, extract::{Query, State}, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::cart,
    entities::{cart_item, product},
};

use super::MessageResponse;

/// Body for `POST /api/cart`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddToCartRequest {
    /// User whose cart receives the line
    pub user_id: i64,
    /// Product to add
    pub product_id: i64,
    /// Units to add; must be positive
    pub quantity: i64,
}

/// Query for `GET /api/cart`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListCartQuery {
    /// User whose cart to list
    pub user_id: i64,
}

/// Body for `DELETE /api/cart`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveFromCartRequest {
    /// User whose cart owns the line
    pub user_id: i64,
    /// The line to remove
    pub cart_item_id: i64,
}

/// One cart line joined with its product, as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    /// Cart line id (used for removal)
    pub id: i64,
    /// Units in the line
    pub quantity: i64,
    /// Full product details
    pub product: product::Model,
}

/// `POST /api/cart` - add a product to the user's cart (201).
pub async fn add(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<cart_item::Model>), ApiError> {
    let line = cart::add_item(&state.db, body.user_id, body.product_id, body.quantity).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// `GET /api/cart?user_id=` - list the user's cart lines (200, maybe empty).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListCartQuery>,
) -> Result<Json<Vec<CartLineResponse>>, ApiError> {
    let entries = cart::list_items(&state.db, query.user_id).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|entry| CartLineResponse {
                id: entry.item.id,
                quantity: entry.item.quantity,
                product: entry.product,
            })
            .collect(),
    ))
}

/// `DELETE /api/cart` - remove one line from the user's cart (200).
pub async fn remove(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RemoveFromCartRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    cart::remove_item(&state.db, body.user_id, body.cart_item_id).await?;
    Ok(Json(MessageResponse {
        message: "Item removed from cart".to_string(),
    }))
}
