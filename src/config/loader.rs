//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (GITOLITE_ADMIN__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "gitolite-admin.toml",
    ".gitolite-admin.toml",
    "~/.config/gitolite-admin/config.toml",
    "/etc/gitolite-admin/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g. GITOLITE_ADMIN__ADMIN__PATH, GITOLITE_ADMIN__RESOLVER__MAX_DEPTH
    builder = builder.add_source(
        Environment::with_prefix("GITOLITE_ADMIN")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    if let Ok(path) = std::env::var("GITOLITE_ADMIN_PATH") {
        builder = builder
            .set_override("admin.path", path)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.admin.admin_repo.trim().is_empty() {
        return Err(ConfigError::Missing {
            field: "admin.admin_repo".to_string(),
        });
    }

    if config.admin.admin_perm.trim().is_empty() {
        return Err(ConfigError::Missing {
            field: "admin.admin_perm".to_string(),
        });
    }

    if config.admin.conf_file.is_empty() || Path::new(&config.admin.conf_file).is_absolute() {
        return Err(ConfigError::Invalid {
            message: format!(
                "admin.conf_file must be a relative path, got: '{}'",
                config.admin.conf_file
            ),
        });
    }

    if config.resolver.max_depth == 0 {
        return Err(ConfigError::Invalid {
            message: "resolver.max_depth must be greater than 0".to_string(),
        });
    }

    Ok(())
}
