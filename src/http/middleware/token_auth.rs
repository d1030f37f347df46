//! Shared-secret auth gate.
//!
//! # Responsibilities
//! - Compare the request credential to the configured secret
//! - Reject before any resource handler runs
//!
//! # Design Decisions
//! - Exact match on `Authorization: Bearer <secret>`
//! - The layer is only installed when a secret is configured; without
//!   one the gate does not exist at all, it is not a pass-through

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::rest::error::ErrorBody;

/// State carried by the auth layer: the configured shared secret.
#[derive(Clone)]
pub struct AuthState {
    pub token: String,
}

pub async fn token_auth_middleware(
    State(state): State<AuthState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|credential| credential == expected)
        .unwrap_or(false);

    if authorized {
        next.run(req).await
    } else {
        tracing::warn!(path = %req.uri().path(), "Rejected request with missing or bad token");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: "missing or invalid auth token".into(),
                code: StatusCode::UNAUTHORIZED.as_u16(),
            }),
        )
            .into_response()
    }
}
