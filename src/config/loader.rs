//! Configuration loading from the environment or from disk.
//!
//! # Responsibilities
//! - Resolve the env-variable surface into a ServerConfig
//! - Alternatively parse a TOML file
//! - Run semantic validation before handing the config out
//!
//! Environment surface: `PORT`, `BASE`, `AUTH_TOKEN`, and either
//! `PREFIXES=a,b,c` with per-prefix `SERVER_<p>` / `DB_<p>` /
//! `READ_ONLY_<p>`, or a single mount from `SERVER` / `DB` /
//! `READ_ONLY`.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ListenerConfig, MountConfig, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment: {0}")]
    Env(String),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: ServerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build and validate configuration from the process environment.
pub fn from_env() -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = std::env::vars().collect();
    from_env_map(&vars)
}

/// Truthiness of a read-only flag: set and not empty/"0"/"false".
fn is_truthy(value: Option<&String>) -> bool {
    match value {
        Some(v) => !matches!(v.as_str(), "" | "0" | "false"),
        None => false,
    }
}

fn mount_from(vars: &HashMap<String, String>, prefix: &str, suffix: &str) -> MountConfig {
    let mut mount = MountConfig {
        prefix: prefix.to_string(),
        ..Default::default()
    };
    if let Some(url) = vars.get(&format!("SERVER{suffix}")) {
        mount.url = url.clone();
    }
    if let Some(db_name) = vars.get(&format!("DB{suffix}")) {
        mount.db_name = db_name.clone();
    }
    mount.read_only = is_truthy(vars.get(&format!("READ_ONLY{suffix}")));
    mount
}

/// Resolve a config from an explicit variable map (separated from
/// `from_env` so tests do not have to mutate the process environment).
pub fn from_env_map(vars: &HashMap<String, String>) -> Result<ServerConfig, ConfigError> {
    let port: u16 = match vars.get("PORT") {
        Some(p) => p
            .parse()
            .map_err(|_| ConfigError::Env(format!("PORT is not a valid port number: {p}")))?,
        None => 8000,
    };

    let mounts = match vars.get("PREFIXES") {
        Some(prefixes) => prefixes
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|prefix| mount_from(vars, prefix, &format!("_{prefix}")))
            .collect(),
        None => vec![mount_from(vars, "", "")],
    };

    let config = ServerConfig {
        listener: ListenerConfig {
            bind_address: format!("0.0.0.0:{port}"),
            ..Default::default()
        },
        base: vars.get("BASE").cloned().unwrap_or_default(),
        auth_token: vars.get("AUTH_TOKEN").cloned(),
        mounts,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
