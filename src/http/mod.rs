//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, /ping, mount nesting)
//!     → middleware/token_auth.rs (auth gate, when configured)
//!     → rest route tables (dispatch by method + path shape)
//!     → response to client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
