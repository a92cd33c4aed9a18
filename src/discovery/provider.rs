//! Provider Capability
//!
//! The contract the discovery core needs from a cloud backend. Concrete
//! vendor clients live outside the core and only have to implement listing;
//! auxiliary detail lookups default to `Unsupported`.
//!
//! Calls are cancelled by dropping their future: the core races every call
//! against the run context and discards completions that arrive late.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use super::filter::FilterSet;
use super::types::{
    Account, ComplianceFinding, Resource, ResourceCost, ResourceDependency, VulnerabilityFinding,
};

/// Errors returned by a provider backend
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backend API rejected or failed the call
    #[error("{0}")]
    Api(String),

    /// The provider does not implement this lookup
    #[error("operation not supported by provider: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for cloud-specific discovery operations
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider instance name
    fn name(&self) -> &str;

    fn project(&self) -> &str {
        ""
    }

    fn region(&self) -> &str {
        ""
    }

    /// List all resources of one type
    async fn list_resources(
        &self,
        resource_type: &str,
        filters: &FilterSet,
    ) -> ProviderResult<Vec<Resource>>;

    async fn resource_tags(&self, _id: &str, _resource_type: &str) -> ProviderResult<HashMap<String, String>> {
        Err(ProviderError::Unsupported("resource_tags"))
    }

    async fn resource_metrics(&self, _id: &str, _resource_type: &str) -> ProviderResult<HashMap<String, f64>> {
        Err(ProviderError::Unsupported("resource_metrics"))
    }

    async fn resource_cost(&self, _id: &str, _resource_type: &str) -> ProviderResult<ResourceCost> {
        Err(ProviderError::Unsupported("resource_cost"))
    }

    async fn resource_dependencies(
        &self,
        _id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<ResourceDependency>> {
        Err(ProviderError::Unsupported("resource_dependencies"))
    }

    async fn resource_configuration(
        &self,
        _id: &str,
        _resource_type: &str,
    ) -> ProviderResult<HashMap<String, serde_json::Value>> {
        Err(ProviderError::Unsupported("resource_configuration"))
    }

    async fn check_compliance(
        &self,
        _id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<ComplianceFinding>> {
        Err(ProviderError::Unsupported("check_compliance"))
    }

    async fn scan_vulnerabilities(
        &self,
        _id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<VulnerabilityFinding>> {
        Err(ProviderError::Unsupported("scan_vulnerabilities"))
    }

    async fn recommendations(&self, _id: &str, _resource_type: &str) -> ProviderResult<Vec<String>> {
        Err(ProviderError::Unsupported("recommendations"))
    }

    /// Discover the accounts (projects, subscriptions...) visible to this provider
    async fn discover_accounts(&self) -> ProviderResult<Vec<Account>>;

    /// Discover every resource owned by one account
    async fn discover_resources(&self, account: &Account) -> ProviderResult<Vec<Resource>>;
}
