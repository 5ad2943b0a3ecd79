//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::ValidationError;

/// Request body decoded as a JSON object.
///
/// Anything that is not an object (unreadable body, invalid JSON, arrays,
/// scalars) is rejected as `InvalidFormat` instead of axum's default
/// rejection, so clients always get the `{"error": ...}` shape.
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::InvalidFormat)?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(ValidationError::InvalidFormat.into()),
        }
    }
}
