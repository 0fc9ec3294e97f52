//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.userdesk.toml` in the working directory
//! 4. `~/.config/userdesk/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    CONFIG_DIR, CONFIG_FILENAME, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_FORMAT, ENV_TIMEOUT, ENV_TOKEN,
};
use crate::env::Env;
use crate::models::OutputFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
}

/// Remote user service connection settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token forwarded verbatim on every request.
    pub token: Option<String>,
    /// Transport timeout; no timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: None,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, the config in `local_dir`, then applies
    /// environment variable overrides. CLI flags are applied by the caller.
    pub fn load(local_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = local_dir {
            let local_path = dir.join(CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_api = ApiConfig::default();
        if other.api.base_url != default_api.base_url {
            self.api.base_url = other.api.base_url;
        }
        if other.api.token.is_some() {
            self.api.token = other.api.token;
        }
        if other.api.timeout_secs.is_some() {
            self.api.timeout_secs = other.api.timeout_secs;
        }

        if other.display.format != OutputFormat::default() {
            self.display.format = other.display.format;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(ENV_BASE_URL) {
            self.api.base_url = val;
        }
        if let Some(val) = env.non_empty(ENV_TOKEN) {
            self.api.token = Some(val);
        }
        if let Some(val) = env.non_empty(ENV_TIMEOUT) {
            match val.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => tracing::warn!("ignoring invalid {ENV_TIMEOUT} value: {val}"),
            }
        }
        if let Some(val) = env.non_empty(ENV_FORMAT) {
            match val.parse::<OutputFormat>() {
                Ok(format) => self.display.format = format,
                Err(_) => tracing::warn!("ignoring invalid {ENV_FORMAT} value: {val}"),
            }
        }
    }
}
