//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! env vars (PORT, BASE, AUTH_TOKEN, PREFIXES, SERVER_*, DB_*, READ_ONLY_*)
//!   or TOML file (--config)
//!     → loader.rs (resolve & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared by value/Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{MountConfig, ServerConfig};
