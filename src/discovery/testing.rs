//! Instrumented in-memory provider shared by the discovery tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::filter::FilterSet;
use super::provider::{Provider, ProviderError, ProviderResult};
use super::types::{
    Account, ComplianceFinding, Resource, ResourceCost, Severity, VulnerabilityFinding,
};

/// Fail the first `times` calls with `message`, then behave normally
#[derive(Debug, Clone)]
pub struct FailureScript {
    pub times: usize,
    pub message: String,
}

/// Concurrent-call counter that several stubs can share
#[derive(Debug, Default)]
pub struct InFlightGauge {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl InFlightGauge {
    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        InFlightGuard(self)
    }
}

/// Leaves the gauge when dropped, including when the call is cancelled
struct InFlightGuard<'a>(&'a InFlightGauge);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct StubProvider {
    name: String,
    resources: HashMap<String, Vec<Resource>>,
    accounts: Vec<Account>,
    account_resources: HashMap<String, Vec<Resource>>,
    list_failures: HashMap<String, FailureScript>,
    account_failure: Option<FailureScript>,
    account_resource_failures: HashMap<String, FailureScript>,
    delay: Option<Duration>,
    type_delays: HashMap<String, Duration>,
    with_details: bool,
    list_calls: Mutex<HashMap<String, usize>>,
    account_calls: AtomicUsize,
    gauge: Arc<InFlightGauge>,
}

impl StubProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_resources(mut self, resource_type: &str, resources: Vec<Resource>) -> Self {
        self.resources.insert(resource_type.to_string(), resources);
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_account_resources(mut self, account_id: &str, resources: Vec<Resource>) -> Self {
        self.account_resources.insert(account_id.to_string(), resources);
        self
    }

    pub fn failing_list(mut self, resource_type: &str, times: usize, message: &str) -> Self {
        self.list_failures.insert(
            resource_type.to_string(),
            FailureScript {
                times,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn failing_accounts(mut self, times: usize, message: &str) -> Self {
        self.account_failure = Some(FailureScript {
            times,
            message: message.to_string(),
        });
        self
    }

    pub fn failing_account_resources(mut self, account_id: &str, times: usize, message: &str) -> Self {
        self.account_resource_failures.insert(
            account_id.to_string(),
            FailureScript {
                times,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay only `list_resources` calls for `resource_type`, overriding `with_delay`
    pub fn with_type_delay(mut self, resource_type: &str, delay: Duration) -> Self {
        self.type_delays.insert(resource_type.to_string(), delay);
        self
    }

    /// Count in-flight calls on a gauge shared with other stubs
    pub fn with_gauge(mut self, gauge: Arc<InFlightGauge>) -> Self {
        self.gauge = gauge;
        self
    }

    /// Answer enrichment lookups instead of returning `Unsupported`
    pub fn with_details(mut self) -> Self {
        self.with_details = true;
        self
    }

    pub fn list_calls(&self, resource_type: &str) -> usize {
        self.list_calls
            .lock()
            .unwrap()
            .get(resource_type)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_list_calls(&self) -> usize {
        self.list_calls.lock().unwrap().values().sum()
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.gauge.max()
    }

    async fn simulate_call(&self, delay: Option<Duration>) {
        let _in_flight = self.gauge.enter();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn scripted_failure(script: Option<&FailureScript>, call_index: usize) -> ProviderResult<()> {
        match script {
            Some(script) if call_index < script.times => Err(ProviderError::Api(script.message.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn project(&self) -> &str {
        "stub-project"
    }

    fn region(&self) -> &str {
        "us-central1"
    }

    async fn list_resources(&self, resource_type: &str, _filters: &FilterSet) -> ProviderResult<Vec<Resource>> {
        let call_index = {
            let mut calls = self.list_calls.lock().unwrap();
            let entry = calls.entry(resource_type.to_string()).or_default();
            *entry += 1;
            *entry - 1
        };
        let delay = self.type_delays.get(resource_type).copied().or(self.delay);
        self.simulate_call(delay).await;
        Self::scripted_failure(self.list_failures.get(resource_type), call_index)?;
        Ok(self.resources.get(resource_type).cloned().unwrap_or_default())
    }

    async fn resource_tags(&self, id: &str, _resource_type: &str) -> ProviderResult<HashMap<String, String>> {
        if !self.with_details {
            return Err(ProviderError::Unsupported("resource_tags"));
        }
        Ok(HashMap::from([("enriched".to_string(), id.to_string())]))
    }

    async fn resource_cost(&self, _id: &str, _resource_type: &str) -> ProviderResult<ResourceCost> {
        if !self.with_details {
            return Err(ProviderError::Unsupported("resource_cost"));
        }
        Ok(ResourceCost {
            currency: "USD".to_string(),
            daily_cost: 1.0,
            monthly_cost: 30.0,
            estimated_annual_cost: 365.0,
            last_updated: chrono::Utc::now(),
        })
    }

    async fn check_compliance(&self, _id: &str, _resource_type: &str) -> ProviderResult<Vec<ComplianceFinding>> {
        if !self.with_details {
            return Err(ProviderError::Api("compliance API unavailable".to_string()));
        }
        Ok(vec![ComplianceFinding {
            control: "cis-4.1".to_string(),
            passed: false,
            severity: Severity::High,
            message: "default service account in use".to_string(),
        }])
    }

    async fn scan_vulnerabilities(
        &self,
        _id: &str,
        _resource_type: &str,
    ) -> ProviderResult<Vec<VulnerabilityFinding>> {
        if !self.with_details {
            return Err(ProviderError::Unsupported("scan_vulnerabilities"));
        }
        Ok(vec![VulnerabilityFinding {
            id: "CVE-2024-0001".to_string(),
            severity: Severity::Medium,
            summary: "outdated image".to_string(),
        }])
    }

    async fn recommendations(&self, _id: &str, _resource_type: &str) -> ProviderResult<Vec<String>> {
        if !self.with_details {
            return Err(ProviderError::Unsupported("recommendations"));
        }
        Ok(vec!["rightsize to e2-small".to_string()])
    }

    async fn discover_accounts(&self) -> ProviderResult<Vec<Account>> {
        let call_index = self.account_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_call(self.delay).await;
        Self::scripted_failure(self.account_failure.as_ref(), call_index)?;
        Ok(self.accounts.clone())
    }

    async fn discover_resources(&self, account: &Account) -> ProviderResult<Vec<Resource>> {
        let call_index = {
            let key = format!("account:{}", account.id);
            let mut calls = self.list_calls.lock().unwrap();
            let entry = calls.entry(key).or_default();
            *entry += 1;
            *entry - 1
        };
        self.simulate_call(self.delay).await;
        Self::scripted_failure(self.account_resource_failures.get(&account.id), call_index)?;
        Ok(self
            .account_resources
            .get(&account.id)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn resources(resource_type: &str, statuses: &[&str]) -> Vec<Resource> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            Resource::new(
                format!("{}-{}", resource_type, i),
                format!("{}-{}", resource_type, i),
                resource_type,
            )
            .with_region("us-central1")
            .with_status(*status)
        })
        .collect()
}
