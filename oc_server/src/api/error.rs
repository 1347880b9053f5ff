//! API error responses.
//!
//! Every failed request returns a machine-readable `{code, message}` body.
//! Internal failures are logged with full detail server-side while the
//! client only sees a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use open_classical::tournament::TournamentError;
use serde::Serialize;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Error type returned by all API handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// Rejection for requests without a usable bearer token
    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorBody {
                code: "unauthorized",
                message: message.to_string(),
            },
        }
    }
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        let (status, code) = match &err {
            TournamentError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            TournamentError::Unauthenticated(_) => (StatusCode::BAD_REQUEST, "unauthenticated"),
            TournamentError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            TournamentError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            _ => {
                tracing::error!("Internal error handling request: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        Self {
            status,
            body: ErrorBody {
                code,
                message: err.client_message(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
