//! Discovery Data Model
//!
//! Accounts, resources and the aggregate result produced by a discovery run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// A billing or organizational unit within a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub provider: String,
    pub name: String,
    /// Account kind (e.g., "project", "folder", "subscription")
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: impl Into<String>, provider: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            provider: provider.into(),
            name: name.into(),
            account_type: String::new(),
            tags: HashMap::new(),
            region: None,
            status: "active".to_string(),
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == "active" || self.status == "enabled"
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Set a tag in place. A shared `Account` is not synchronized.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

/// Cost estimate attached to a single resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub currency: String,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub estimated_annual_cost: f64,
    pub last_updated: DateTime<Utc>,
}

/// Direction of a dependency edge relative to the owning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyDirection {
    Inbound,
    Outbound,
}

/// A typed, directed relationship discovered alongside a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDependency {
    pub resource_id: String,
    pub resource_type: String,
    pub dependency_type: String,
    pub direction: DependencyDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Result of a single compliance control evaluated against a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    pub control: String,
    pub passed: bool,
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    pub id: String,
    pub severity: Severity,
    #[serde(default)]
    pub summary: String,
}

/// Identity of a resource across providers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    pub provider: String,
    pub resource_type: String,
    pub id: String,
}

/// A single discovered cloud object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Name of the provider instance that reported this resource
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "labels")]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub account: Account,
    #[serde(default, alias = "configuration", skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<ResourceCost>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ResourceDependency>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metrics: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compliance: Vec<ComplianceFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<VulnerabilityFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "modified_at")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub discovered_at: DateTime<Utc>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            resource_type: resource_type.into(),
            provider: String::new(),
            region: String::new(),
            zone: None,
            network: None,
            status: String::new(),
            tags: HashMap::new(),
            account: Account::default(),
            properties: HashMap::new(),
            cost: None,
            dependencies: Vec::new(),
            metrics: HashMap::new(),
            compliance: Vec::new(),
            vulnerabilities: Vec::new(),
            recommendations: Vec::new(),
            created_at: now,
            updated_at: now,
            discovered_at: now,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = account;
        self
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.status.to_ascii_lowercase().as_str(),
            "running" | "active" | "available"
        )
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn identity(&self) -> ResourceKey {
        ResourceKey {
            provider: self.provider.clone(),
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }
}

/// A structured, non-fatal failure recorded during discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryError {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub error: String,
    pub timestamp: DateTime<Utc>,
    pub retryable: bool,
}

impl DiscoveryError {
    pub fn new(provider: impl Into<String>, error: impl Into<String>, retryable: bool) -> Self {
        Self {
            provider: provider.into(),
            account: None,
            resource: None,
            resource_type: None,
            error: error.into(),
            timestamp: Utc::now(),
            retryable,
        }
    }

    pub fn for_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn for_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }
}

/// Derived counters over a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySummary {
    pub total_accounts: usize,
    pub total_resources: usize,
    pub resources_by_type: HashMap<String, usize>,
    pub resources_by_region: HashMap<String, usize>,
    pub resources_by_status: HashMap<String, usize>,
    pub resources_by_provider: HashMap<String, usize>,
    pub accounts_by_provider: HashMap<String, usize>,
    pub error_count: usize,
    pub total_monthly_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub total_monthly_cost: f64,
    pub estimated_annual_cost: f64,
    pub currency: String,
}

/// Provider identity and derived statistics attached after a single-provider run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub provider: String,
    pub project: String,
    pub region: String,
    pub first_resource_discovered: Option<DateTime<Utc>>,
    pub last_resource_discovered: Option<DateTime<Utc>>,
    /// errors / (resources + errors), 0.0 for an empty run
    pub error_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
}

/// Aggregate outcome of a discovery run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub run_id: Uuid,
    pub accounts: Vec<Account>,
    pub resources: Vec<Resource>,
    pub errors: Vec<DiscoveryError>,
    pub summary: DiscoverySummary,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RunMetadata>,
}

impl DiscoveryResult {
    /// Start an empty result stamped with the current time
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            accounts: Vec::new(),
            resources: Vec::new(),
            errors: Vec::new(),
            summary: DiscoverySummary::default(),
            start_time: Utc::now(),
            end_time: None,
            duration: Duration::ZERO,
            metadata: None,
        }
    }

    pub fn add_account(&mut self, account: Account) {
        *self
            .summary
            .accounts_by_provider
            .entry(account.provider.clone())
            .or_default() += 1;
        self.accounts.push(account);
        self.summary.total_accounts = self.accounts.len();
    }

    pub fn add_resource(&mut self, resource: Resource) {
        let summary = &mut self.summary;
        *summary
            .resources_by_type
            .entry(resource.resource_type.clone())
            .or_default() += 1;
        *summary
            .resources_by_region
            .entry(resource.region.clone())
            .or_default() += 1;
        *summary
            .resources_by_status
            .entry(resource.status.clone())
            .or_default() += 1;
        *summary
            .resources_by_provider
            .entry(resource.provider.clone())
            .or_default() += 1;
        if let Some(cost) = &resource.cost {
            summary.total_monthly_cost += cost.monthly_cost;
        }
        self.resources.push(resource);
        self.summary.total_resources = self.resources.len();
    }

    pub fn add_error(&mut self, error: DiscoveryError) {
        self.errors.push(error);
        self.summary.error_count = self.errors.len();
    }

    /// Append every item of `other`, recomputing counters item by item
    pub fn merge(&mut self, other: DiscoveryResult) {
        for account in other.accounts {
            self.add_account(account);
        }
        for resource in other.resources {
            self.add_resource(resource);
        }
        for error in other.errors {
            self.add_error(error);
        }
    }

    /// Stamp the end time and compute the duration. Only the first call has an effect.
    pub fn finish(&mut self) {
        if self.end_time.is_some() {
            return;
        }
        let end = Utc::now();
        self.duration = (end - self.start_time).to_std().unwrap_or(Duration::ZERO);
        self.end_time = Some(end);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn retryable_errors(&self) -> Vec<&DiscoveryError> {
        self.errors.iter().filter(|e| e.retryable).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for DiscoveryResult {
    fn default() -> Self {
        Self::start()
    }
}
