//! REST error taxonomy and response mapping.
//!
//! # Responsibilities
//! - One error type for everything a handler can fail with
//! - Map each variant to an HTTP status and a JSON error body
//!
//! # Design Decisions
//! - Errors are request-scoped; nothing is retried or recorded globally
//! - Store failures are logged server-side but returned opaque (500)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the resource handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed raw filter or unusable request body. Never reaches the store.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Identifier lookup matched nothing.
    #[error("document not found")]
    NotFound,

    /// The underlying store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON body attached to every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Store(ref e) = self {
            tracing::error!(error = %e, "Store operation failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
