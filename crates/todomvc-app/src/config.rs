#![forbid(unsafe_code)]

//! Application configuration.
//!
//! Values are resolved in three layers: built-in defaults, an optional JSON
//! file named by `TODOMVC_CONFIG`, then the `TODOMVC_ROUTE` and `TODOMVC_LOG`
//! environment variables.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unreadable file | Bad path, permissions | [`ConfigError::Io`] |
//! | Malformed JSON / unknown key | Typo in file | [`ConfigError::Parse`] |
//! | Route without leading `/` | Bad file or env value | [`ConfigError::InvalidRoute`] |
//! | Empty store name | Bad file value | [`ConfigError::EmptyStoreName`] |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Env var naming a JSON config file.
pub const ENV_CONFIG: &str = "TODOMVC_CONFIG";
/// Env var overriding [`TodoConfig::initial_route`].
pub const ENV_ROUTE: &str = "TODOMVC_ROUTE";
/// Env var overriding [`TodoConfig::log_filter`].
pub const ENV_LOG: &str = "TODOMVC_LOG";

/// Errors from loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The config file is not valid JSON for [`TodoConfig`].
    Parse(String),
    /// A route did not start with `/`.
    InvalidRoute(String),
    /// The root store name was empty.
    EmptyStoreName,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidRoute(route) => write!(f, "invalid route '{route}': must start with '/'"),
            Self::EmptyStoreName => write!(f, "store name must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Runtime settings for the application and its front end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TodoConfig {
    /// Route selected at startup.
    pub initial_route: String,
    /// `tracing` env-filter directive for the front end's subscriber.
    pub log_filter: String,
    /// Name of the root store; prefixes every derived store name.
    pub store_name: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            initial_route: "/".to_string(),
            log_filter: "warn".to_string(),
            store_name: "todos".to_string(),
        }
    }
}

impl TodoConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Apply env overrides looked up through `lookup`.
    pub fn with_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(route) = lookup(ENV_ROUTE) {
            self.initial_route = route;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self.validate()?;
        Ok(self)
    }

    /// Resolve defaults, the optional config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var_os(ENV_CONFIG) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        base.with_env_from(|key| env::var(key).ok())
    }

    /// Check field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(self.initial_route.clone()));
        }
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::EmptyStoreName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = TodoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_route, "/");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TodoConfig::from_json_str(r#"{"initial_route": "/active"}"#).expect("valid");
        assert_eq!(config.initial_route, "/active");
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.store_name, "todos");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = TodoConfig::from_json_str(r#"{"route": "/"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_route_is_rejected() {
        let err = TodoConfig::from_json_str(r#"{"initial_route": "active"}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid route 'active': must start with '/'");
    }

    #[test]
    fn empty_store_name_is_rejected() {
        let err = TodoConfig::from_json_str(r#"{"store_name": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStoreName));
    }

    #[test]
    fn env_overrides_file_values() {
        let config = TodoConfig::default()
            .with_env_from(env_of(&[(ENV_ROUTE, "/completed"), (ENV_LOG, "debug")]))
            .expect("valid");
        assert_eq!(config.initial_route, "/completed");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn env_route_is_validated() {
        let err = TodoConfig::default()
            .with_env_from(env_of(&[(ENV_ROUTE, "completed")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoute(_)));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"store_name": "inbox"}}"#).expect("write");
        let config = TodoConfig::from_file(file.path()).expect("valid");
        assert_eq!(config.store_name, "inbox");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TodoConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
