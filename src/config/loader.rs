//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied after the file, so `PORT=8080` wins
/// over whatever the file says.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ServerConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Default configuration with environment overrides applied.
pub fn load_default_config() -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();
    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply process-environment overrides to a config.
pub fn apply_env_overrides(config: &mut ServerConfig) -> Result<(), ConfigError> {
    apply_overrides_from(config, |var| env::var(var).ok())
}

/// Override application with an injectable variable source.
///
/// `PORT` and `HOST` adjust the listener; `APP_ENV=production` switches
/// log output to JSON; `FOLIO_ASSET_DIR` and `FOLIO_PROFILE` point at the
/// built assets and the content model file.
pub fn apply_overrides_from<F>(config: &mut ServerConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = get("PORT") {
        config.listener.port = value.parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value,
        })?;
    }

    if let Some(value) = get("HOST") {
        config.listener.host = value;
    }

    if let Some(value) = get("APP_ENV") {
        if value == "production" {
            config.observability.log_format = "json".to_string();
        }
    }

    if let Some(value) = get("FOLIO_ASSET_DIR") {
        config.static_files.asset_dir = value;
    }

    if let Some(value) = get("FOLIO_PROFILE") {
        config.content.profile_path = Some(value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn apply(config: &mut ServerConfig, vars: &[(&str, &str)]) -> Result<(), ConfigError> {
        let vars = overrides(vars);
        apply_overrides_from(config, |var| vars.get(var).cloned())
    }

    #[test]
    fn port_env_overrides_default() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("PORT", "8080")]).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn invalid_port_env_is_rejected() {
        let mut config = ServerConfig::default();
        let err = apply(&mut config, &[("PORT", "not-a-port")]).unwrap_err();
        match err {
            ConfigError::Env { var, value } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "not-a-port");
            }
            other => panic!("expected Env, got {other:?}"),
        }
    }

    #[test]
    fn production_env_selects_json_logs() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("APP_ENV", "production")]).unwrap();
        assert_eq!(config.observability.log_format, "json");

        let mut config = ServerConfig::default();
        apply(&mut config, &[("APP_ENV", "development")]).unwrap();
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn asset_dir_and_profile_envs_apply() {
        let mut config = ServerConfig::default();
        apply(
            &mut config,
            &[
                ("FOLIO_ASSET_DIR", "/srv/site"),
                ("FOLIO_PROFILE", "/etc/folio/profile.toml"),
                ("HOST", "127.0.0.1"),
            ],
        )
        .unwrap();
        assert_eq!(config.static_files.asset_dir, "/srv/site");
        assert_eq!(
            config.content.profile_path.as_deref(),
            Some("/etc/folio/profile.toml")
        );
        assert_eq!(config.listener.host, "127.0.0.1");
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.port, 5000);
        assert_eq!(config.listener.max_bind_attempts, 10);
        assert_eq!(config.static_files.index_file, "index.html");
    }

    #[test]
    fn toml_fields_deserialize() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            host = "127.0.0.1"
            port = 3000
            max_bind_attempts = 3
            reuse_port = false

            [static_files]
            asset_dir = "public"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.host, "127.0.0.1");
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.max_bind_attempts, 3);
        assert!(!config.listener.reuse_port);
        assert_eq!(config.static_files.asset_dir, "public");
    }
}
