use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// `axum::Json` with the rejection folded into the API error contract.
///
/// A body that cannot be deserialized (missing field, wrong type, broken
/// JSON) comes back as 400 `InvalidInput` with the usual
/// `{"error", "message"}` body instead of axum's plain-text 422.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rej: JsonRejection| {
                JsonApiError::new(StatusCode::BAD_REQUEST, "InvalidInput", rej.body_text())
            })?;
        Ok(ApiJson(value.0))
    }
}
