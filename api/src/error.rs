//! Unified error types for the marketplace API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `UpstreamError`: WooCommerce / Dokan / forum client errors
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the external marketplace and forum APIs
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} API error: {status} - {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} rejected the configured credentials")]
    Unauthorized { service: &'static str },

    #[error("{service} rate limited the request")]
    RateLimited { service: &'static str },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Extractor rejections (bad JSON, unknown enum values, non-numeric params)
// all surface as 400 with axum's description as the message

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Domain(DomainError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "Forbidden".to_string(), Some(msg.clone()))
            }
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict".to_string(), Some(msg.clone()))
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            // Upstream failures are passed through with their message, never retried
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string(), None),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), Some(msg.clone()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}
