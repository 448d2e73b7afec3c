//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempt budget ≥ 1, timeouts > 0)
//! - Check the listener host parses as an IP address
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.host {0:?} is not a valid IP address")]
    InvalidHost(String),

    #[error("listener.max_bind_attempts must be at least 1")]
    NoBindAttempts,

    #[error("static_files.asset_dir must not be empty")]
    EmptyAssetDir,

    #[error("static_files.index_file must not be empty")]
    EmptyIndexFile,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_format {0:?} is not one of \"pretty\" or \"json\"")]
    InvalidLogFormat(String),
}

/// Check a config for semantic problems, collecting every failure.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.parse::<std::net::IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }

    if config.listener.max_bind_attempts == 0 {
        errors.push(ValidationError::NoBindAttempts);
    }

    if config.static_files.asset_dir.is_empty() {
        errors.push(ValidationError::EmptyAssetDir);
    }

    if config.static_files.index_file.is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::InvalidLogFormat(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
