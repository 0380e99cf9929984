//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:8080
//! store:
//!   request_timeout_ms: 5000
//! dashboard:
//!   user: ops
//!   password: change-me
//! ```
//!
//! Every section is optional. Dashboard credentials are usually supplied via
//! `DASHBOARD_USER` / `DASHBOARD_PASSWORD` rather than the file.

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_DASHBOARD_USER: &str = "DASHBOARD_USER";
pub const ENV_DASHBOARD_PASSWORD: &str = "DASHBOARD_PASSWORD";
pub const ENV_BIND: &str = "PREORDER_BIND";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the REST exposure listens on
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,
}

impl ServerConfig {
    fn default_bind() -> String {
        "127.0.0.1:3000".to_string()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

/// Record store client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper bound for a single create/list/update round trip
    #[serde(default = "StoreConfig::default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    fn default_timeout_ms() -> u64 {
        10_000
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: Self::default_timeout_ms(),
        }
    }
}

/// Static operator credentials gating the review board
///
/// A plain string comparison. Not a security system.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCredentials {
    pub user: String,
    pub password: String,
}

impl DashboardCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, user: &str, password: &str) -> bool {
        self.user == user && self.password == password
    }
}

impl std::fmt::Debug for DashboardCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials section as written in YAML, where either half may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl DashboardConfig {
    /// Both halves, or nothing
    pub fn credentials(&self) -> Option<DashboardCredentials> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some(DashboardCredentials::new(user, password))
            }
            _ => None,
        }
    }
}

/// Complete configuration of a storefront deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl StorefrontConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for local development
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Overlay values from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup (the environment, in production)
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(user) = lookup(ENV_DASHBOARD_USER) {
            self.dashboard.user = Some(user);
        }
        if let Some(password) = lookup(ENV_DASHBOARD_PASSWORD) {
            self.dashboard.password = Some(password);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "store.request_timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
