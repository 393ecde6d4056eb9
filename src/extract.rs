//! Custom request extractors
//!
//! Wrappers over axum's `Json` and `Query` that turn rejections and declared
//! constraint failures into structured [`ApiError`] responses.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body extractor with structured error responses.
///
/// Syntax-level failures (invalid JSON, wrong content type) map to 400; data
/// failures (a field missing or of the wrong type) map to 422, with the serde
/// message naming the offending field.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(err) => {
                    ApiError::UnprocessableBody(format!("Invalid JSON data: {}", err))
                }
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::MalformedBody(format!("JSON syntax error: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::MalformedBody(
                    "Missing 'Content-Type: application/json' header".to_string(),
                ),
                other => ApiError::MalformedBody(format!("Failed to parse JSON: {}", other)),
            }),
        }
    }
}

/// Query extractor that runs the target type's declared constraints before
/// the handler executes.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::UnprocessableQuery(format!("Invalid query string: {}", rejection.body_text()))
            })?;

        params.validate()?;

        Ok(Self(params))
    }
}
