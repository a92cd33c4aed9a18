//! Resource Discovery
//!
//! Concurrent, cancellable enumeration of cloud accounts and resources.
//!
//! Architecture:
//! - `Provider` is the backend contract; implementations live in `crate::providers`
//! - `Discoverer` scans the resource types of one provider
//! - `DiscoveryEngine` discovers accounts and resources across registered providers
//! - Workers report through single-collector sinks (`aggregate`), so each run's
//!   `DiscoveryResult` has exactly one writer

pub mod aggregate;
pub mod cache;
pub mod context;
pub mod discoverer;
pub mod engine;
pub mod error;
pub mod filter;
pub mod options;
pub mod provider;
pub mod retry;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::ResourceCache;
pub use context::{CancelHandle, ContextError, DiscoveryContext};
pub use discoverer::Discoverer;
pub use engine::{DiscoveryEngine, ProviderRegistry};
pub use error::{ConfigError, DiscoveryRunError};
pub use filter::{AccountRule, FilterSet, ResourceFilter, ResourceRule, RuleAction};
pub use options::{DiscoveryConfig, DiscoveryOptions, ResourceTypes, DEFAULT_RESOURCE_TYPES};
pub use provider::{Provider, ProviderError, ProviderResult};
pub use retry::{is_retryable, RetryPolicy};
pub use types::{
    Account, ComplianceFinding, CostAnalysis, DependencyDirection, DiscoveryError, DiscoveryResult,
    DiscoverySummary, Resource, ResourceCost, ResourceDependency, ResourceKey, RunMetadata, Severity,
    VulnerabilityFinding,
};
