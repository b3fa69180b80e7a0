//! Custom Axum extractors.
//!
//! [`ApiJson`] wraps `axum::Json` so that malformed or missing-field bodies
//! surface as 400 with this API's error envelope instead of axum's default
//! 422 plain-text rejection. Request types all use `deny_unknown_fields`,
//! so an unexpected key is rejected here too, before any store call.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor with 400-on-rejection semantics.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}
