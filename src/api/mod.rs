//! HTTP layer - axum router, shared state, and request/response types.
//!
//! Handlers translate requests into [`crate::core`] calls and core errors
//! into status codes; no business rules live here.

/// Error-to-status mapping and the JSON error envelope
pub mod error;
/// Custom extractors (400-on-rejection JSON bodies)
pub mod extract;
/// HTTP handlers, one module per resource
pub mod handlers;

use axum::{
    Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::errors::Result;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all store operations
    pub db: DatabaseConnection,
}

impl AppState {
    /// Creates the handler state around a database connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Builds the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/products",
            post(handlers::products::create).get(handlers::products::list),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get)
                .put(handlers::products::update)
                .delete(handlers::products::remove),
        )
        .route(
            "/api/pets",
            post(handlers::pets::create).get(handlers::pets::list),
        )
        .route(
            "/api/pets/:id",
            get(handlers::pets::get)
                .put(handlers::pets::update)
                .delete(handlers::pets::remove),
        )
        .route(
            "/api/cart",
            post(handlers::cart::add)
                .get(handlers::cart::list)
                .delete(handlers::cart::remove),
        )
        .route(
            "/api/orders",
            post(handlers::orders::place).get(handlers::orders::list),
        )
        .route(
            "/api/orders/:id",
            get(handlers::orders::get)
                .put(handlers::orders::set_status)
                .delete(handlers::orders::cancel),
        )
        .route(
            "/api/adoption-requests",
            post(handlers::adoptions::create).get(handlers::adoptions::list),
        )
        .route("/api/adoption-requests/:id", put(handlers::adoptions::resolve))
        .route(
            "/api/vet-consultations",
            post(handlers::consultations::create).get(handlers::consultations::list),
        )
        .route(
            "/api/vet-consultations/:id",
            put(handlers::consultations::set_status),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves the router until the process stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = setup_test_db().await.unwrap();
        router(AppState::new(db))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_product(app: &Router, name: &str, price: f64, quantity: i64) -> i64 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/products",
                serde_json::json!({
                    "name": name,
                    "price": price,
                    "image": "/img/p.png",
                    "quantity": quantity,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    async fn seed_pet(app: &Router, name: &str) -> i64 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/pets",
                serde_json::json!({
                    "name": name,
                    "breed": "Beagle",
                    "age": 2,
                    "image": "/img/pet.png",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cart_roundtrip_accumulates() {
        let app = app().await;
        let product_id = seed_product(&app, "Dog Food", 10.0, 50).await;

        for quantity in [2, 3] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/cart",
                    serde_json::json!({
                        "user_id": 1,
                        "product_id": product_id,
                        "quantity": quantity,
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/cart?user_id=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let lines = body_json(response).await;
        assert_eq!(lines.as_array().unwrap().len(), 1);
        assert_eq!(lines[0]["quantity"], 5);
        assert_eq!(lines[0]["product"]["name"], "Dog Food");
    }

    #[tokio::test]
    async fn test_cart_rejects_missing_and_unknown_fields() {
        let app = app().await;

        // Missing quantity.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/cart",
                serde_json::json!({ "user_id": 1, "product_id": 2 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Unknown field.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/cart",
                serde_json::json!({
                    "user_id": 1,
                    "product_id": 2,
                    "quantity": 1,
                    "gift_wrap": true,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cart_empty_without_cart() {
        let app = app().await;
        let response = app
            .oneshot(get_request("/api/cart?user_id=99"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let app = app().await;
        let product_a = seed_product(&app, "Dog Food", 10.0, 50).await;
        let product_b = seed_product(&app, "Ball", 5.0, 50).await;

        for (product_id, quantity) in [(product_a, 2), (product_b, 1)] {
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/cart",
                    serde_json::json!({
                        "user_id": 1,
                        "product_id": product_id,
                        "quantity": quantity,
                    }),
                ))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "user_id": 1,
                    "cart_items": [
                        { "product_id": product_a, "price": 10.0, "quantity": 2 },
                        { "product_id": product_b, "price": 5.0, "quantity": 1 },
                    ],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let order = body_json(response).await;
        assert_eq!(order["total_amount"], 25.0);
        assert_eq!(order["status"], "Pending");
        assert_eq!(order["items"].as_array().unwrap().len(), 2);

        let response = app
            .clone()
            .oneshot(get_request("/api/cart?user_id=1"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_place_order_empty_lines_is_400() {
        let app = app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/orders",
                serde_json::json!({ "user_id": 1, "cart_items": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_order_status_transition_decrements_stock() {
        let app = app().await;
        let product_id = seed_product(&app, "Dog Food", 10.0, 10).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "user_id": 1,
                    "cart_items": [
                        { "product_id": product_id, "price": 10.0, "quantity": 3 },
                    ],
                }),
            ))
            .await
            .unwrap();
        let order_id = body_json(response).await["id"].as_i64().unwrap();

        // Invalid status value first: 400, nothing applied.
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/orders/{order_id}"),
                serde_json::json!({ "status": "Teleported" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/orders/{order_id}"),
                serde_json::json!({ "status": "Shipped" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/products/{product_id}")))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["quantity"], 7);
    }

    #[tokio::test]
    async fn test_cancel_is_pending_only() {
        let app = app().await;
        let product_id = seed_product(&app, "Dog Food", 10.0, 10).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "user_id": 1,
                    "cart_items": [
                        { "product_id": product_id, "price": 10.0, "quantity": 1 },
                    ],
                }),
            ))
            .await
            .unwrap();
        let order_id = body_json(response).await["id"].as_i64().unwrap();

        app.clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/orders/{order_id}"),
                serde_json::json!({ "status": "Processing" }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/orders/{order_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Missing order: 404.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/orders/4040")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_adoption_lifecycle_over_http() {
        let app = app().await;
        let pet_id = seed_pet(&app, "Rex").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/adoption-requests",
                serde_json::json!({
                    "pet_id": pet_id,
                    "user_id": 4,
                    "message": "We have a big yard",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let request_id = body_json(response).await["id"].as_i64().unwrap();

        // The pet is hidden from the available listing while pending.
        let response = app
            .clone()
            .oneshot(get_request("/api/pets?available=true"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));

        // Invalid decision: 400 and nothing changes.
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/adoption-requests/{request_id}"),
                serde_json::json!({ "status": "Maybe" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/adoption-requests/{request_id}"),
                serde_json::json!({ "status": "Rejected" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "Rejected");

        // Pet is back in the available listing; request is gone (404 on retry).
        let response = app
            .clone()
            .oneshot(get_request("/api/pets?available=true"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await[0]["name"], "Rex");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/adoption-requests/{request_id}"),
                serde_json::json!({ "status": "Approved" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_consultation_endpoints() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/vet-consultations",
                serde_json::json!({
                    "user_id": 3,
                    "requested_date": "2026-09-01T10:30:00Z",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let consultation = body_json(response).await;
        assert_eq!(consultation["status"], "Pending");
        let consultation_id = consultation["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/vet-consultations/{consultation_id}"),
                serde_json::json!({ "status": "Completed" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "Completed");
    }

    #[tokio::test]
    async fn test_product_delete_in_use_is_400() {
        let app = app().await;
        let product_id = seed_product(&app, "Dog Food", 10.0, 10).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "user_id": 1,
                    "cart_items": [
                        { "product_id": product_id, "price": 10.0, "quantity": 1 },
                    ],
                }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/products/{product_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("referenced"));
    }

    #[tokio::test]
    async fn test_unknown_order_is_404() {
        let app = app().await;
        let response = app.oneshot(get_request("/api/orders/12345")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
