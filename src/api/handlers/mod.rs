//! HTTP handlers, one module per resource.

/// Adoption request endpoints
pub mod adoptions;
/// Cart endpoints
pub mod cart;
/// Vet consultation endpoints
pub mod consultations;
/// Order endpoints
pub mod orders;
/// Pet catalog endpoints
pub mod pets;
/// Product catalog endpoints
pub mod products;

use axum::http::StatusCode;
use serde::Serialize;

/// Generic `{ "message": ... }` acknowledgement used by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// `GET /health` - liveness probe; does not touch the database.
#[allow(clippy::unused_async)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
