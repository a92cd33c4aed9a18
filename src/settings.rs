//! Settings File
//!
//! JSON configuration for the binary. Durations are whole seconds. Every
//! field is optional and falls back to the library defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::discovery::options::{
    DEFAULT_BATCH_SIZE, DEFAULT_CACHE_TTL, DEFAULT_MAX_WORKERS, DEFAULT_RETRY_ATTEMPTS,
    DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};
use crate::discovery::{
    AccountRule, ConfigError, DiscoveryConfig, DiscoveryOptions, FilterSet, ResourceRule, ResourceTypes,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_workers: usize,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_delay_secs: u64,
    /// `None` scans the default catalog
    pub resource_types: Option<Vec<String>>,
    pub deep_scan: bool,
    pub include_tags: bool,
    pub include_metrics: bool,
    pub include_costs: bool,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub batch_size: usize,
    pub filters: FilterSet,
    /// Engine-wide provider parallelism
    pub max_concurrency: usize,
    pub account_rules: Vec<AccountRule>,
    pub resource_rules: Vec<ResourceRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_secs: DEFAULT_RETRY_DELAY.as_secs(),
            resource_types: None,
            deep_scan: false,
            include_tags: false,
            include_metrics: false,
            include_costs: false,
            cache_enabled: false,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            batch_size: DEFAULT_BATCH_SIZE,
            filters: FilterSet::empty(),
            max_concurrency: DEFAULT_MAX_WORKERS,
            account_rules: Vec::new(),
            resource_rules: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn resource_types(&self) -> Result<ResourceTypes, ConfigError> {
        match &self.resource_types {
            None => Ok(ResourceTypes::Catalog),
            Some(types) => {
                if types.iter().any(|t| t.trim().is_empty()) {
                    return Err(ConfigError::Invalid {
                        field: "resource_types",
                        message: "resource type names must not be blank".to_string(),
                    });
                }
                Ok(ResourceTypes::Only(types.clone()))
            }
        }
    }

    /// Single-provider options, validated
    pub fn discovery_options(&self) -> Result<DiscoveryOptions, ConfigError> {
        let options = DiscoveryOptions {
            max_workers: self.max_workers,
            timeout: self.timeout(),
            retry_attempts: self.retry_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            resource_types: self.resource_types()?,
            deep_scan: self.deep_scan,
            filters: self.filters.clone(),
            include_tags: self.include_tags,
            include_metrics: self.include_metrics,
            include_costs: self.include_costs,
            cache_enabled: self.cache_enabled,
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            batch_size: self.batch_size,
        };
        options.validate()?;
        Ok(options)
    }

    /// Multi-provider engine configuration, validated
    pub fn discovery_config(&self) -> Result<DiscoveryConfig, ConfigError> {
        let config = DiscoveryConfig {
            max_concurrency: self.max_concurrency,
            timeout: self.timeout(),
            retry_attempts: self.retry_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            account_rules: self.account_rules.clone(),
            resource_rules: self.resource_rules.clone(),
            resource_filters: self.filters.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
