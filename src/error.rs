//! Server error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Client-facing error for the item routes.
///
/// Every variant renders as a JSON body carrying the status code and, where a
/// specific field is at fault, an `errors` array naming it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not parseable JSON, or the content type is not JSON.
    #[error("{0}")]
    MalformedBody(String),

    /// Body parsed as JSON but does not coerce into the target type.
    #[error("{0}")]
    UnprocessableBody(String),

    /// Query string does not deserialize into the parameter type.
    #[error("{0}")]
    UnprocessableQuery(String),

    /// A declared field constraint failed.
    #[error("validation failed")]
    ConstraintViolation(#[from] ValidationErrors),

    /// A field the operation depends on was absent from the payload.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableBody(_)
            | ApiError::UnprocessableQuery(_)
            | ApiError::ConstraintViolation(_)
            | ApiError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::ConstraintViolation(errors) => Json(json!({
                "error": self.to_string(),
                "errors": field_errors(errors),
                "status": status.as_u16(),
            })),
            ApiError::MissingField(field) => Json(json!({
                "error": self.to_string(),
                "errors": [{"field": field, "message": "field is required"}],
                "status": status.as_u16(),
            })),
            _ => Json(json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            })),
        };

        (status, body).into_response()
    }
}

/// Flatten `ValidationErrors` into `{"field", "message"}` entries, sorted so
/// the output is stable across runs.
fn field_errors(errors: &ValidationErrors) -> Vec<serde_json::Value> {
    let mut entries: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errs)| {
            let field = field.to_string();
            field_errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    entries.sort();

    entries
        .into_iter()
        .map(|(field, message)| json!({"field": field, "message": message}))
        .collect()
}
