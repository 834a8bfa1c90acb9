//! Error responses of the inspection API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::cache::CacheError;
use crate::iglu::{ResolutionError, SchemaVerError};
use crate::routing::scope::SERVICE_PREFIX;

/// Failure of a protected API call, mapped to a terminal response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("path not found")]
    PathNotFound,

    #[error(transparent)]
    InvalidVersion(#[from] SchemaVerError),

    #[error(transparent)]
    SchemaNotResolved(#[from] ResolutionError),

    #[error("invalid filter document: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Valid sub-paths, listed in the not-found message.
pub fn available_paths() -> String {
    ["all", "good", "bad", "events", "reset", "iglu", "auth-config", "ui"]
        .iter()
        .map(|p| format!("{SERVICE_PREFIX}/{p}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::PathNotFound => (
                StatusCode::NOT_FOUND,
                format!("Path not found. Available ones are: {}", available_paths()),
            )
                .into_response(),
            ApiError::InvalidVersion(_) => (
                StatusCode::NOT_FOUND,
                "Schema version should be in the format MODEL-REVISION-ADDITION, e.g. 1-0-0",
            )
                .into_response(),
            ApiError::SchemaNotResolved(err) => (StatusCode::NOT_FOUND, Json(err)).into_response(),
            ApiError::InvalidFilter(_) => {
                (StatusCode::BAD_REQUEST, "Request body is not a valid filter document").into_response()
            }
            ApiError::Cache(err) => {
                tracing::error!(error = %err, "Validation cache failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Validation cache unavailable").into_response()
            }
        }
    }
}
