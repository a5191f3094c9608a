//! Error types for the sync server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tillpoint_engine::EngineError;

/// Result type for request handling.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (bad watermark, oversized batch).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Engine-level failure (unknown entity, persistence).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Engine(EngineError::UnknownEntity { .. }) => {
                (StatusCode::NOT_FOUND, "unknown_entity")
            }
            ApiError::Engine(err) => {
                tracing::error!(%err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "sync_failed")
            }
        };

        let body = Json(ErrorBody {
            error,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let resp = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Unauthorized("no token".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = ApiError::Engine(EngineError::unknown_entity("gadgets")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
