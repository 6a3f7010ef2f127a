//! Custom Axum extractors.
//!
//! - [`ValidJson`]: JSON body whose rejections become [`AppError`] 400s
//! - [`CorrelationId`]: the request's correlation ID
//!
//! # Examples
//!
//! ```ignore
//! use classbook_web::extractors::{CorrelationId, ValidJson};
//!
//! async fn handler(
//!     correlation_id: CorrelationId,
//!     ValidJson(request): ValidJson<CreateMemberRequest>,
//! ) -> Result<Json<Response>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// JSON request body.
///
/// Behaves like [`axum::Json`] but every rejection (bad syntax, wrong field
/// types, missing content type) becomes an [`AppError::bad_request`] with
/// the standard error body, so malformed input never reaches a handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::bad_request(rejection.body_text()))
            },
        }
    }
}

/// Correlation ID for request tracing.
///
/// Uses the ID assigned by
/// [`correlation_id_layer`](crate::middleware::correlation_id_layer) when the
/// layer is installed, otherwise reads `X-Correlation-ID` or generates a new
/// UUID v4.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
