//! Route tables binding method + path shape to handlers.
//!
//! # Design Decisions
//! - Pure composition, no logic beyond binding
//! - `read_only` omits mutating routes entirely; a PUT against a
//!   read-only mount is indistinguishable from any unmapped request

use axum::{routing::get, Router};

use crate::rest::handlers;
use crate::rest::MountState;

/// Full CRUD route table for one mount.
pub fn all() -> Router<MountState> {
    Router::new()
        .route(
            "/{collection}",
            get(handlers::list).post(handlers::create),
        )
        .route(
            "/{collection}/{id}",
            get(handlers::get_one)
                .put(handlers::update)
                .patch(handlers::update)
                .delete(handlers::remove),
        )
}

/// Read-only route table: list and get-by-id only.
pub fn read_only() -> Router<MountState> {
    Router::new()
        .route("/{collection}", get(handlers::list))
        .route("/{collection}/{id}", get(handlers::get_one))
}
