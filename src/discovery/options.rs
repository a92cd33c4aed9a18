//! Discovery Options
//!
//! Immutable configuration for single-provider (`DiscoveryOptions`) and
//! multi-provider (`DiscoveryConfig`) runs.

use std::time::Duration;
use tokio::sync::Semaphore;

use super::error::ConfigError;
use super::filter::{AccountRule, FilterSet, ResourceRule};
use super::retry::RetryPolicy;

/// Resource types scanned when no explicit selection is given
pub const DEFAULT_RESOURCE_TYPES: &[&str] = &[
    "compute.instances",
    "compute.disks",
    "compute.networks",
    "compute.subnetworks",
    "compute.firewalls",
    "compute.loadBalancers",
    "compute.backendServices",
    "compute.healthChecks",
    "storage.buckets",
    "storage.objects",
    "sql.instances",
    "sql.databases",
    "bigquery.datasets",
    "bigquery.tables",
    "pubsub.topics",
    "pubsub.subscriptions",
    "cloudrun.services",
    "cloudfunctions.functions",
    "appengine.services",
    "kubernetes.clusters",
    "kubernetes.nodePools",
    "iam.serviceAccounts",
    "iam.roles",
    "iam.policies",
    "monitoring.alertPolicies",
    "monitoring.dashboards",
    "logging.sinks",
    "logging.metrics",
    "secretmanager.secrets",
    "kms.keyRings",
    "kms.cryptoKeys",
];

pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Which resource types a discoverer scans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceTypes {
    /// The built-in default catalog
    #[default]
    Catalog,
    /// Exactly these types; an empty list scans nothing
    Only(Vec<String>),
}

impl ResourceTypes {
    pub fn single(resource_type: impl Into<String>) -> Self {
        Self::Only(vec![resource_type.into()])
    }

    pub fn resolve(&self) -> Vec<String> {
        match self {
            ResourceTypes::Catalog => DEFAULT_RESOURCE_TYPES.iter().map(|t| t.to_string()).collect(),
            ResourceTypes::Only(types) => types.clone(),
        }
    }
}

/// Options for a single-provider discovery run
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOptions {
    pub max_workers: usize,
    /// Deadline for the whole `discover` call
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub resource_types: ResourceTypes,
    pub deep_scan: bool,
    pub filters: FilterSet,
    pub include_tags: bool,
    pub include_metrics: bool,
    pub include_costs: bool,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    /// Capacity of the resource aggregation sink
    pub batch_size: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            resource_types: ResourceTypes::Catalog,
            deep_scan: false,
            filters: FilterSet::empty(),
            include_tags: false,
            include_metrics: false,
            include_costs: false,
            cache_enabled: false,
            cache_ttl: DEFAULT_CACHE_TTL,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl DiscoveryOptions {
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn resource_types(mut self, resource_types: ResourceTypes) -> Self {
        self.resource_types = resource_types;
        self
    }

    pub fn deep_scan(mut self, deep_scan: bool) -> Self {
        self.deep_scan = deep_scan;
        self
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Enable tag, metric and cost enrichment during deep scans
    pub fn include_all_details(mut self) -> Self {
        self.include_tags = true;
        self.include_metrics = true;
        self.include_costs = true;
        self
    }

    pub fn include_costs(mut self, include_costs: bool) -> Self {
        self.include_costs = include_costs;
        self
    }

    pub fn cache(mut self, ttl: Duration) -> Self {
        self.cache_enabled = true;
        self.cache_ttl = ttl;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_delay)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::NotPositive { field: "max_workers" });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::NotPositive { field: "batch_size" });
        }
        within_permit_limit("max_workers", self.max_workers)?;
        within_permit_limit("batch_size", self.batch_size)?;
        if self.timeout.is_zero() {
            return Err(ConfigError::NotPositive { field: "timeout" });
        }
        if self.cache_enabled && self.cache_ttl.is_zero() {
            return Err(ConfigError::NotPositive { field: "cache_ttl" });
        }
        Ok(())
    }
}

/// Configuration for a multi-provider engine run
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    pub max_concurrency: usize,
    /// Deadline applied to each provider's discovery sequence
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub account_rules: Vec<AccountRule>,
    pub resource_rules: Vec<ResourceRule>,
    pub resource_filters: FilterSet,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            account_rules: Vec::new(),
            resource_rules: Vec::new(),
            resource_filters: FilterSet::empty(),
        }
    }
}

impl DiscoveryConfig {
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn account_rule(mut self, rule: AccountRule) -> Self {
        self.account_rules.push(rule);
        self
    }

    pub fn resource_rule(mut self, rule: ResourceRule) -> Self {
        self.resource_rules.push(rule);
        self
    }

    pub fn resource_filters(mut self, filters: FilterSet) -> Self {
        self.resource_filters = filters;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_delay)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::NotPositive { field: "max_concurrency" });
        }
        within_permit_limit("max_concurrency", self.max_concurrency)?;
        if self.timeout.is_zero() {
            return Err(ConfigError::NotPositive { field: "timeout" });
        }
        Ok(())
    }
}

/// Worker limits and channel capacities are backed by semaphores
fn within_permit_limit(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > Semaphore::MAX_PERMITS {
        return Err(ConfigError::TooLarge {
            field,
            max: Semaphore::MAX_PERMITS,
        });
    }
    Ok(())
}
