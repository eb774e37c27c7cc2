//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Fatal generation-time errors. Any of these aborts startup; the service
/// never comes up with a partial route or document set.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("catalog introspection failed: {0}")]
    Introspection(#[from] sqlx::Error),
    #[error("unexpected catalog row shape: {0}")]
    MalformedCatalog(String),
    #[error("duplicate resource name: {0}")]
    DuplicateResource(String),
}

/// Per-request errors, recovered at the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("record not found")]
    NotFound,
    #[error("statement execution failed")]
    Statement(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Statement(e)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Statement text and driver detail stay in the log; the response
        // carries only a generic message.
        let (status, code, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", "Record not found"),
            AppError::Statement(e) => {
                tracing::error!(error = %e, "statement execution failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
