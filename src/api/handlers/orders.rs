//! Order endpoints: place, list, fetch, set status, cancel while pending.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::{AppState, error::ApiError, extract::ApiJson},
    core::order::{self, OrderLineInput, OrderWithItems},
    entities::{order as order_entity, order_item},
};

use super::MessageResponse;

/// One line of `POST /api/orders`: the client's snapshot of its cart.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderLineRequest {
    /// Product the line refers to
    pub product_id: i64,
    /// Unit price as currently shown to the client
    pub price: f64,
    /// Units ordered
    pub quantity: i64,
}

/// Body for `POST /api/orders`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceOrderRequest {
    /// User placing the order
    pub user_id: i64,
    /// Snapshot of the cart lines being ordered
    pub cart_items: Vec<OrderLineRequest>,
}

/// Query for `GET /api/orders`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListOrdersQuery {
    /// Restrict to one user's orders; omit for the admin view of all
    pub user_id: Option<i64>,
}

/// Body for `PUT /api/orders/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderStatusRequest {
    /// Target status value
    pub status: String,
}

/// An order with its line snapshots, as returned to clients.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// The order record
    #[serde(flatten)]
    pub order: order_entity::Model,
    /// Its line snapshots
    pub items: Vec<order_item::Model>,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(value: OrderWithItems) -> Self {
        Self {
            order: value.order,
            items: value.items,
        }
    }
}

/// `POST /api/orders` - place an order from cart-line snapshots (201).
pub async fn place(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let lines = body
        .cart_items
        .into_iter()
        .map(|line| OrderLineInput {
            product_id: line.product_id,
            price: line.price,
            quantity: line.quantity,
        })
        .collect();
    let placed = order::place_order(&state.db, body.user_id, lines).await?;
    Ok((StatusCode::CREATED, Json(placed.into())))
}

/// `GET /api/orders[?user_id=]` - list orders (200).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = order::list_orders(&state.db, query.user_id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// `GET /api/orders/:id` - one order with its lines (200).
pub async fn get(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let fetched = order::get_order(&state.db, order_id).await?;
    Ok(Json(fetched.into()))
}

/// `PUT /api/orders/:id` - mutate the order status (200), applying
/// inventory side effects on the first transition out of Pending.
pub async fn set_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    ApiJson(body): ApiJson<UpdateOrderStatusRequest>,
) -> Result<Json<order_entity::Model>, ApiError> {
    let updated = order::set_order_status(&state.db, order_id, &body.status).await?;
    Ok(Json(updated))
}

/// `DELETE /api/orders/:id` - cancel an order that is still Pending (200).
pub async fn cancel(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    order::cancel_order(&state.db, order_id).await?;
    Ok(Json(MessageResponse {
        message: "Order cancelled successfully".to_string(),
    }))
}
