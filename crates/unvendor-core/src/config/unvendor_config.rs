//! Top-level configuration and layered loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

use super::registry_config::RegistryConfig;
use super::scan_config::{DiscoveryMode, ScanConfig};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "unvendor.toml";

pub const ENV_SCAN_DISCOVERY: &str = "UNVENDOR_SCAN_DISCOVERY";
pub const ENV_STATE_PATH: &str = "UNVENDOR_STATE_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct UnvendorConfig {
    pub scan: ScanConfig,
    pub registry: RegistryConfig,
}

impl UnvendorConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration for `root`.
    ///
    /// Layers, later wins: defaults, `user_config` (if given), `<root>/unvendor.toml`
    /// (if present), then `UNVENDOR_*` environment variables.
    pub fn load(root: &Path, user_config: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = user_config {
            config.merge(Self::from_file(path)?);
        }

        let project_file = root.join(PROJECT_CONFIG_FILE);
        if project_file.is_file() {
            config.merge(Self::from_file(&project_file)?);
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn merge(&mut self, other: UnvendorConfig) {
        self.scan.merge(other.scan);
        self.registry.merge(other.registry);
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var(ENV_SCAN_DISCOVERY) {
            let mode = value
                .parse::<DiscoveryMode>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_SCAN_DISCOVERY.to_string(),
                    value: value.clone(),
                })?;
            self.scan.discovery = Some(mode);
        }
        if let Ok(value) = std::env::var(ENV_STATE_PATH) {
            if !value.trim().is_empty() {
                self.registry.state_path = Some(value);
            }
        }
        Ok(())
    }
}
