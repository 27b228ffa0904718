//! Configuration types for gitolite-admin
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::access_control::types::{
    DEFAULT_ADMIN_PERM, DEFAULT_ADMIN_REPO, DEFAULT_MAX_DEPTH, ResolverOptions,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Admin repository location
    pub admin: AdminConfig,

    /// Access resolution settings
    pub resolver: ResolverConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Path of the configuration file inside the admin working tree
    pub fn conf_path(&self) -> PathBuf {
        let base = shellexpand::tilde(&self.admin.path);
        PathBuf::from(base.into_owned()).join(&self.admin.conf_file)
    }

    /// Options for [`crate::access_control::AccessResolver`]
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            max_depth: self.resolver.max_depth,
            admin_repo: self.admin.admin_repo.clone(),
            admin_perm: self.admin.admin_perm.clone(),
        }
    }
}

/// Admin repository configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Working tree of the admin repository
    pub path: String,

    /// Configuration file, relative to `path`
    pub conf_file: String,

    /// Repository that grants administrative rights
    pub admin_repo: String,

    /// Permission on `admin_repo` that makes a user an administrator
    pub admin_perm: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            conf_file: "conf/gitolite.conf".to_string(),
            admin_repo: DEFAULT_ADMIN_REPO.to_string(),
            admin_perm: DEFAULT_ADMIN_PERM.to_string(),
        }
    }
}

/// Access resolution configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Deepest group nesting followed during expansion
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
