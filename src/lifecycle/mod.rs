//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Connect stores → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or broadcast → stop accepting → drain in-flight → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
