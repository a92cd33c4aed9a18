//! Inventory Provider
//!
//! Serves accounts and resources from an exported JSON inventory so that
//! discovery can run offline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::discovery::filter::FilterSet;
use crate::discovery::provider::{Provider, ProviderError, ProviderResult};
use crate::discovery::types::{
    Account, ComplianceFinding, Resource, ResourceCost, ResourceDependency, VulnerabilityFinding,
};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse inventory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("inventory snapshot has no provider name")]
    MissingName,
}

/// Optional per-resource detail answered by the auxiliary lookups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<ResourceCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<ResourceDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Vec<ComplianceFinding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<VulnerabilityFinding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// On-disk inventory format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub name: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Keyed by resource id
    #[serde(default)]
    pub details: HashMap<String, ResourceDetails>,
}

#[derive(Debug)]
pub struct InventoryProvider {
    snapshot: InventorySnapshot,
}

impl InventoryProvider {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: InventorySnapshot = serde_json::from_str(&raw).map_err(|source| InventoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let provider = Self::from_snapshot(snapshot)?;
        info!(
            provider = %provider.snapshot.name,
            path = %path.display(),
            accounts = provider.snapshot.accounts.len(),
            resources = provider.snapshot.resources.len(),
            "Loaded inventory"
        );
        Ok(provider)
    }

    /// Every account and resource is attributed to this snapshot's name
    pub fn from_snapshot(mut snapshot: InventorySnapshot) -> Result<Self, InventoryError> {
        if snapshot.name.trim().is_empty() {
            return Err(InventoryError::MissingName);
        }
        for account in &mut snapshot.accounts {
            account.provider = snapshot.name.clone();
        }
        for resource in &mut snapshot.resources {
            resource.provider = snapshot.name.clone();
        }
        Ok(Self { snapshot })
    }

    pub fn snapshot(&self) -> &InventorySnapshot {
        &self.snapshot
    }

    fn detail<T>(
        &self,
        id: &str,
        lookup: &'static str,
        select: impl FnOnce(&ResourceDetails) -> Option<T>,
    ) -> ProviderResult<T> {
        self.snapshot
            .details
            .get(id)
            .and_then(select)
            .ok_or(ProviderError::Unsupported(lookup))
    }
}

#[async_trait]
impl Provider for InventoryProvider {
    fn name(&self) -> &str {
        &self.snapshot.name
    }

    fn project(&self) -> &str {
        &self.snapshot.project
    }

    fn region(&self) -> &str {
        &self.snapshot.region
    }

    async fn list_resources(&self, resource_type: &str, filters: &FilterSet) -> ProviderResult<Vec<Resource>> {
        Ok(self
            .snapshot
            .resources
            .iter()
            .filter(|r| r.resource_type == resource_type && filters.matches(r))
            .cloned()
            .collect())
    }

    async fn resource_tags(&self, id: &str, _resource_type: &str) -> ProviderResult<HashMap<String, String>> {
        self.detail(id, "resource_tags", |d| d.tags.clone())
    }

    async fn resource_metrics(&self, id: &str, _resource_type: &str) -> ProviderResult<HashMap<String, f64>> {
        self.detail(id, "resource_metrics", |d| d.metrics.clone())
    }

    async fn resource_cost(&self, id: &str, _resource_type: &str) -> ProviderResult<ResourceCost> {
        self.detail(id, "resource_cost", |d| d.cost.clone())
    }

    async fn resource_dependencies(
        &self,
        id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<ResourceDependency>> {
        self.detail(id, "resource_dependencies", |d| d.dependencies.clone())
    }

    async fn resource_configuration(
        &self,
        id: &str,
        _resource_type: &str,
    ) -> ProviderResult<HashMap<String, serde_json::Value>> {
        self.detail(id, "resource_configuration", |d| d.configuration.clone())
    }

    async fn check_compliance(&self, id: &str, _resource_type: &str) -> ProviderResult<Vec<ComplianceFinding>> {
        self.detail(id, "check_compliance", |d| d.compliance.clone())
    }

    async fn scan_vulnerabilities(
        &self,
        id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<VulnerabilityFinding>> {
        self.detail(id, "scan_vulnerabilities", |d| d.vulnerabilities.clone())
    }

    async fn recommendations(&self, id: &str, _resource_type: &str) -> ProviderResult<Vec<String>> {
        self.detail(id, "recommendations", |d| d.recommendations.clone())
    }

    async fn discover_accounts(&self) -> ProviderResult<Vec<Account>> {
        Ok(self.snapshot.accounts.clone())
    }

    async fn discover_resources(&self, account: &Account) -> ProviderResult<Vec<Resource>> {
        Ok(self
            .snapshot
            .resources
            .iter()
            .filter(|r| r.account.id == account.id)
            .cloned()
            .collect())
    }
}
