//! Request filters applied ahead of the route tables.

pub mod token_auth;

pub use token_auth::{token_auth_middleware, AuthState};
