//! API error type and its HTTP mapping.
//!
//! Every handler and extractor fails with [`ApiError`]. The response body is
//! always `{"detail": ...}`: a string for 404/500 and a list of
//! [`FieldError`]s for 422.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http::validation::FieldError;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource or route does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request parameters or body failed to parse or validate.
    #[error("request validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// Unexpected server-side failure. The message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn item_not_found() -> Self {
        ApiError::NotFound("Item not found".to_string())
    }

    pub fn route_not_found() -> Self {
        ApiError::NotFound("Not Found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(detail) => json!({ "detail": detail }),
            ApiError::Validation(errors) => {
                tracing::debug!(errors = errors.len(), "Request rejected by validation");
                json!({ "detail": errors })
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                json!({ "detail": "Internal Server Error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "model_attributes_type",
            JsonRejection::BytesRejection(_) => "body_unreadable",
            _ => "value_error",
        };
        ApiError::Validation(vec![FieldError::new(["body"], rejection.body_text(), kind)])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![FieldError::new(
            ["query"],
            rejection.body_text(),
            "value_error",
        )])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => ApiError::Validation(vec![
                FieldError::new(["path"], err.body_text(), "int_parsing"),
            ]),
            other => ApiError::Internal(other.body_text()),
        }
    }
}
