//! HTTP error mapping.
//!
//! Every failure renders as `{ "message": ... }` with a 4xx/5xx status —
//! the shape the polling UI displays verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Validation failures: unknown voter, duplicate registration or vote,
    /// ineligible status, unknown candidate.
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid admin key")]
    Unauthorized,

    /// Admin actions aimed at a voter hash that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The ledger refused writes after a detected integrity violation.
    #[error("Ledger halted: integrity violation detected")]
    Halted,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Halted => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
