//! Generic REST-to-store translation subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query string)
//!     → routes.rs (method + path shape → handler)
//!     → handlers.rs (decode id, build filter, call store)
//!     → id.rs / filter.rs (path segment → Bson, query → Document)
//!     → store operation
//!     → error.rs (store outcome → HTTP status + JSON body)
//! ```
//!
//! # Design Decisions
//! - Two route tables: full CRUD and read-only; read-only simply does
//!   not register mutating routes, so those verbs answer like any
//!   other unmapped request
//! - Collection names come straight from the path; no allow-list,
//!   the store is the authority on what exists
//! - Filters never span collections: one resource per request

pub mod error;
pub mod filter;
pub mod handlers;
pub mod id;
pub mod routes;

use std::sync::Arc;

use crate::store::DocumentStore;

/// Per-mount state shared by every handler under one prefix.
#[derive(Clone)]
pub struct MountState {
    /// Store handle for this mount's database.
    pub store: Arc<dyn DocumentStore>,
    /// Mount prefix, kept for log context only.
    pub prefix: String,
}

impl MountState {
    pub fn new(store: Arc<dyn DocumentStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }
}
