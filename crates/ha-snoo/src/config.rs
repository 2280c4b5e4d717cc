//! Integration configuration
//!
//! ```yaml
//! snoo:
//!   platforms: [binary_sensor, select, switch]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ha_entity::Platform;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::DOMAIN;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading the integration config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnooConfig {
    /// Platforms to set up, all of them by default
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

/// Keys a bare `snoo` block may contain
const CONFIG_KEYS: [&str; 1] = ["platforms"];

fn is_bare_block(value: &Value) -> bool {
    match value.as_mapping() {
        Some(map) => map
            .keys()
            .any(|key| key.as_str().is_some_and(|key| CONFIG_KEYS.contains(&key))),
        None => true,
    }
}

impl Default for SnooConfig {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
        }
    }
}

impl SnooConfig {
    /// Load the config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading Snoo config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse either the bare block or a document with a top-level `snoo:` key
    ///
    /// A document with neither (say, a `configuration.yaml` that only
    /// configures other integrations) yields the defaults.
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let mut value: Value = serde_yaml::from_str(content)?;
        if let Some(block) = value.get_mut(DOMAIN) {
            value = std::mem::replace(block, Value::Null);
        } else if !is_bare_block(&value) {
            debug!("No {} section in document, using defaults", DOMAIN);
            value = Value::Null;
        }

        let mut config: SnooConfig = match value {
            Value::Null => SnooConfig::default(),
            value => serde_yaml::from_value(value)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject an empty platform list and drop duplicates
    pub fn validate(&mut self) -> ConfigResult<()> {
        if self.platforms.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "platforms".to_string(),
                reason: "at least one platform is required".to_string(),
            });
        }

        let mut seen = Vec::with_capacity(self.platforms.len());
        for platform in self.platforms.drain(..) {
            if seen.contains(&platform) {
                warn!(%platform, "Platform listed more than once, ignoring duplicate");
                continue;
            }
            seen.push(platform);
        }
        self.platforms = seen;
        Ok(())
    }

    pub fn is_enabled(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}
