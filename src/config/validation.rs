//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check mount prefixes are unique and well-formed
//! - Validate the bind address and store coordinates
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// One semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bind address '{0}' is not a valid socket address")]
    BadBindAddress(String),

    #[error("no mounts configured")]
    NoMounts,

    #[error("duplicate mount prefix '{0}'")]
    DuplicatePrefix(String),

    #[error("mount prefix '{0}' must not contain '/'")]
    BadPrefix(String),

    #[error("mount '{0}' has an empty connection url")]
    EmptyUrl(String),

    #[error("mount '{0}' has an empty database name")]
    EmptyDbName(String),
}

/// Check a configuration for semantic problems, reporting all of them.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.mounts.is_empty() {
        errors.push(ValidationError::NoMounts);
    }

    let mut seen = HashSet::new();
    for mount in &config.mounts {
        if !seen.insert(mount.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(mount.prefix.clone()));
        }
        if mount.prefix.contains('/') {
            errors.push(ValidationError::BadPrefix(mount.prefix.clone()));
        }
        if mount.url.is_empty() {
            errors.push(ValidationError::EmptyUrl(mount.prefix.clone()));
        }
        if mount.db_name.is_empty() {
            errors.push(ValidationError::EmptyDbName(mount.prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
