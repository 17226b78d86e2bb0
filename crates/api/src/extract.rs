use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use sentinel_dns_domain::DomainError;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// JSON body extractor that ignores `Content-Type` and reports every
/// rejection as a 400 with a JSON error body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError(DomainError::InvalidRequest(e.body_text())))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError(DomainError::InvalidRequest(format!("Invalid JSON body: {}", e))))
    }
}
