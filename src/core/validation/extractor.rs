//! Axum extractor for validated input schemas
//!
//! `ValidatedJson<T>` parses the request body into `T`, normalizes it and
//! runs its `validator` rules before the handler ever sees it.

use super::Sanitize;
use crate::core::error::{ApiError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes, sanitizes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_category(
///     ValidatedJson(input): ValidatedJson<CategoryInput>,
/// ) -> ApiResult<impl IntoResponse> {
///     // input already passed its rules
/// }
/// ```
///
/// Malformed JSON or a body of the wrong shape is rejected with 400; rule
/// failures are rejected with 422 and per-field messages.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Sanitize,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut payload): Json<T> =
            Json::from_request(req, state)
                .await
                .map_err(|rejection: JsonRejection| {
                    ApiError::Validation(ValidationError::InvalidJson {
                        message: rejection.body_text(),
                    })
                })?;

        payload.sanitize();
        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}
