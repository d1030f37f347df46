//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! server. All types derive Serde traits for deserialization from
//! config files; every field has a default so minimal configs work.

use serde::{Deserialize, Serialize};

/// Default MongoDB connection string when a mount does not name one.
pub const DEFAULT_URL: &str = "mongodb://localhost";

/// Default database name when a mount does not name one.
pub const DEFAULT_DB_NAME: &str = "test";

/// Root configuration for the REST server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Path prefix placed in front of every mount (may be empty).
    pub base: String,

    /// Shared-secret token. None disables the auth gate entirely.
    pub auth_token: Option<String>,

    /// Databases to expose, one mount per entry.
    pub mounts: Vec<MountConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// One database exposed under one URL prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// URL prefix for this mount (empty for a single root mount).
    pub prefix: String,

    /// MongoDB connection string.
    pub url: String,

    /// Database name.
    pub db_name: String,

    /// When set, only list and get-by-id routes are registered.
    pub read_only: bool,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            url: DEFAULT_URL.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            read_only: false,
        }
    }
}

impl MountConfig {
    /// Path this mount is nested under, combining base and prefix.
    /// Always starts with "/"; the root mount maps to "/".
    pub fn mount_path(&self, base: &str) -> String {
        let mut path = String::new();
        for segment in [base, self.prefix.as_str()] {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                path.push('/');
                path.push_str(segment);
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}
