//! Configuration key access for `tilefetch config get/set/list`.

use std::str::FromStr;

use thiserror::Error;

use super::file::ConfigFileError;
use super::parser::apply_value;
use super::settings::ConfigFile;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CacheDirectory,
    CacheMaxAgeHours,
    CacheExtension,
    NetworkConnectTimeoutSecs,
    NetworkReadTimeoutSecs,
    NetworkProbeAddress,
    LayerUrl,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.to_lowercase())
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::CacheDirectory,
            ConfigKey::CacheMaxAgeHours,
            ConfigKey::CacheExtension,
            ConfigKey::NetworkConnectTimeoutSecs,
            ConfigKey::NetworkReadTimeoutSecs,
            ConfigKey::NetworkProbeAddress,
            ConfigKey::LayerUrl,
        ]
    }

    /// Get the canonical key name (e.g., "cache.max_age_hours").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::CacheDirectory => "cache.directory",
            ConfigKey::CacheMaxAgeHours => "cache.max_age_hours",
            ConfigKey::CacheExtension => "cache.extension",
            ConfigKey::NetworkConnectTimeoutSecs => "network.connect_timeout_secs",
            ConfigKey::NetworkReadTimeoutSecs => "network.read_timeout_secs",
            ConfigKey::NetworkProbeAddress => "network.probe_address",
            ConfigKey::LayerUrl => "layer.url",
        }
    }

    /// Get the section name (e.g., "cache").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "max_age_hours").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::CacheDirectory => config.cache.directory.display().to_string(),
            ConfigKey::CacheMaxAgeHours => config.cache.max_age_hours.to_string(),
            ConfigKey::CacheExtension => config.cache.extension.clone(),
            ConfigKey::NetworkConnectTimeoutSecs => config.network.connect_timeout_secs.to_string(),
            ConfigKey::NetworkReadTimeoutSecs => config.network.read_timeout_secs.to_string(),
            ConfigKey::NetworkProbeAddress => config.network.probe_address.clone(),
            ConfigKey::LayerUrl => config.layer.url.clone(),
        }
    }

    /// Set the value in a config file, validating it the same way the file
    /// parser does.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        apply_value(config, self.section(), self.key_name(), value).map_err(|e| match e {
            ConfigFileError::InvalidValue { reason, .. } => ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            },
            other => ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason: other.to_string(),
            },
        })
    }
}
