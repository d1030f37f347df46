//! Generic REST API server for MongoDB collections.
//!
//! Exposes one or more databases as REST resources: every collection
//! supports list, get-by-id, create, update and delete, with filtering
//! from query parameters or a raw `__filter` query document. Several
//! databases can be mounted under different URL prefixes in one
//! process, each optionally read-only, all optionally behind a single
//! shared-secret token.

// Core subsystems
pub mod config;
pub mod http;
pub mod rest;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
