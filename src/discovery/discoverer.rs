//! Single-Provider Discoverer
//!
//! Scans every configured resource type of one provider with bounded
//! parallelism, then optionally runs a deep-scan pass over what was found.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::aggregate::{spawn_aggregator, Emitter};
use super::cache::ResourceCache;
use super::context::DiscoveryContext;
use super::error::ConfigError;
use super::options::DiscoveryOptions;
use super::provider::{Provider, ProviderError, ProviderResult};
use super::retry::{is_retryable_error, with_retry, RetryOutcome};
use super::types::{CostAnalysis, DiscoveryError, DiscoveryResult, Resource, RunMetadata};

/// Discovers the resources of one provider
pub struct Discoverer {
    provider: Arc<dyn Provider>,
    options: Arc<DiscoveryOptions>,
    cache: Option<Arc<ResourceCache>>,
}

impl Discoverer {
    /// Validates `options`. A private cache is created when caching is enabled.
    pub fn new(provider: Arc<dyn Provider>, options: DiscoveryOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let cache = options
            .cache_enabled
            .then(|| Arc::new(ResourceCache::new(options.cache_ttl)));
        Ok(Self {
            provider,
            options: Arc::new(options),
            cache,
        })
    }

    /// Use a shared cache. Caching is active whenever a cache is attached.
    pub fn with_cache(mut self, cache: Arc<ResourceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&Arc<ResourceCache>> {
        self.cache.as_ref()
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one discovery pass. Always returns a finished result; failures are
    /// recorded in `errors` and cancellation keeps what was already collected.
    pub async fn discover(&self, ctx: &DiscoveryContext) -> DiscoveryResult {
        let run_ctx = ctx.with_timeout(self.options.timeout);
        let resource_types = self.options.resource_types.resolve();

        info!(
            provider = %self.provider.name(),
            resource_types = resource_types.len(),
            max_workers = self.options.max_workers,
            deep_scan = self.options.deep_scan,
            "Starting discovery"
        );

        let aggregator = spawn_aggregator(
            DiscoveryResult::start(),
            self.options.batch_size,
            self.options.max_workers,
            run_ctx.clone(),
        );
        let permits = Arc::new(Semaphore::new(self.options.max_workers));
        let mut tasks = JoinSet::new();

        for resource_type in resource_types {
            let scan = TypeScan {
                provider: self.provider.clone(),
                options: self.options.clone(),
                cache: self.cache.clone(),
                emitter: aggregator.emitter(),
                ctx: run_ctx.clone(),
            };
            let permits = permits.clone();
            tasks.spawn(async move {
                let Some(Ok(_permit)) = scan.ctx.run(permits.acquire_owned()).await else {
                    return;
                };
                scan.run(&resource_type).await;
            });
        }

        let emitter = aggregator.emitter();
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(provider = %self.provider.name(), error = %e, "Resource scan task failed");
                emitter
                    .error(DiscoveryError::new(
                        self.provider.name(),
                        format!("resource scan task failed: {}", e),
                        false,
                    ))
                    .await;
            }
        }
        drop(emitter);

        let mut result = aggregator.finish().await;

        if self.options.deep_scan {
            if run_ctx.is_done() {
                debug!(provider = %self.provider.name(), "Context done, skipping deep scan");
            } else {
                self.deep_scan(&run_ctx, &mut result.resources).await;
            }
        }

        result.finish();
        result.metadata = Some(self.run_metadata(&result));

        if let Some(reason) = run_ctx.err() {
            warn!(
                provider = %self.provider.name(),
                reason = %reason,
                resources = result.resources.len(),
                "Discovery stopped early; returning partial result"
            );
        }
        info!(
            provider = %self.provider.name(),
            resources = result.summary.total_resources,
            errors = result.summary.error_count,
            duration_ms = result.duration.as_millis() as u64,
            "Discovery complete"
        );

        result
    }

    /// Attach compliance, vulnerability and recommendation detail
    async fn deep_scan(&self, ctx: &DiscoveryContext, resources: &mut [Resource]) {
        let provider = self.provider.as_ref();
        let enriched = stream::iter(resources.iter_mut())
            .map(|resource| attach_findings(provider, ctx, resource))
            .buffer_unordered(self.options.max_workers)
            .filter(|attached| futures::future::ready(*attached))
            .count()
            .await;
        debug!(provider = %provider.name(), enriched, "Deep scan complete");
    }

    fn run_metadata(&self, result: &DiscoveryResult) -> RunMetadata {
        let observed = result.resources.len() + result.errors.len();
        let error_rate = if observed == 0 {
            0.0
        } else {
            result.errors.len() as f64 / observed as f64
        };

        let cost_analysis = self.options.include_costs.then(|| {
            let currency = result
                .resources
                .iter()
                .find_map(|r| r.cost.as_ref().map(|c| c.currency.clone()))
                .unwrap_or_else(|| "USD".to_string());
            CostAnalysis {
                total_monthly_cost: result.summary.total_monthly_cost,
                estimated_annual_cost: result.summary.total_monthly_cost * 12.0,
                currency,
            }
        });

        RunMetadata {
            provider: self.provider.name().to_string(),
            project: self.provider.project().to_string(),
            region: self.provider.region().to_string(),
            first_resource_discovered: result.resources.iter().map(|r| r.discovered_at).min(),
            last_resource_discovered: result.resources.iter().map(|r| r.discovered_at).max(),
            error_rate,
            cost_analysis,
        }
    }
}

/// Everything one per-type worker needs, owned so it can be spawned
struct TypeScan {
    provider: Arc<dyn Provider>,
    options: Arc<DiscoveryOptions>,
    cache: Option<Arc<ResourceCache>>,
    emitter: Emitter,
    ctx: DiscoveryContext,
}

impl TypeScan {
    async fn run(&self, resource_type: &str) {
        let provider_name = self.provider.name();

        if let Some(cache) = &self.cache {
            let cached: Vec<Resource> = cache
                .get(resource_type)
                .into_iter()
                .filter(|r| r.provider == provider_name)
                .collect();
            // Hit or miss is decided before this run's filters apply
            if !cached.is_empty() {
                let matching: Vec<Resource> = cached
                    .into_iter()
                    .filter(|r| self.options.filters.matches(r))
                    .collect();
                debug!(provider = %provider_name, resource_type, count = matching.len(), "Serving resources from cache");
                for resource in matching {
                    if !self.emitter.resource(resource).await {
                        return;
                    }
                }
                return;
            }
        }

        let provider = self.provider.as_ref();
        let filters = &self.options.filters;
        let outcome = with_retry(&self.ctx, &self.options.retry_policy(), resource_type, move || {
            provider.list_resources(resource_type, filters)
        })
        .await;

        match outcome {
            RetryOutcome::Success(resources) => {
                let listed = resources.len();
                let mut emitted = 0usize;
                for mut resource in resources {
                    if !filters.matches(&resource) {
                        continue;
                    }
                    if self.options.deep_scan {
                        self.enrich(&mut resource).await;
                    }
                    resource.provider = provider_name.to_string();
                    resource.discovered_at = Utc::now();
                    if let Some(cache) = &self.cache {
                        cache.put(resource.clone());
                    }
                    if !self.emitter.resource(resource).await {
                        return;
                    }
                    emitted += 1;
                }
                debug!(provider = %provider_name, resource_type, listed, emitted, "Resource type scanned");
            }
            RetryOutcome::Failed { error, attempts } => {
                let retryable = is_retryable_error(&error);
                warn!(
                    provider = %provider_name,
                    resource_type,
                    attempts,
                    retryable,
                    error = %error,
                    "Failed to list resources"
                );
                self.emitter
                    .error(
                        DiscoveryError::new(provider_name, error.to_string(), retryable)
                            .for_resource_type(resource_type),
                    )
                    .await;
            }
            RetryOutcome::Cancelled => {
                debug!(provider = %provider_name, resource_type, "Resource scan cancelled");
            }
        }
    }

    async fn enrich(&self, resource: &mut Resource) {
        let provider = self.provider.as_ref();
        let id = resource.id.clone();
        let ty = resource.resource_type.clone();

        if self.options.include_tags {
            if let Some(tags) = lookup(&self.ctx, "tags", &id, provider.resource_tags(&id, &ty)).await {
                resource.tags.extend(tags);
            }
        }
        if self.options.include_metrics {
            if let Some(metrics) = lookup(&self.ctx, "metrics", &id, provider.resource_metrics(&id, &ty)).await {
                resource.metrics = metrics;
            }
        }
        if self.options.include_costs {
            if let Some(cost) = lookup(&self.ctx, "cost", &id, provider.resource_cost(&id, &ty)).await {
                resource.cost = Some(cost);
            }
        }
        if let Some(dependencies) =
            lookup(&self.ctx, "dependencies", &id, provider.resource_dependencies(&id, &ty)).await
        {
            resource.dependencies = dependencies;
        }
        if let Some(configuration) =
            lookup(&self.ctx, "configuration", &id, provider.resource_configuration(&id, &ty)).await
        {
            resource.properties.extend(configuration);
        }
    }
}

async fn attach_findings(provider: &dyn Provider, ctx: &DiscoveryContext, resource: &mut Resource) -> bool {
    let id = resource.id.clone();
    let ty = resource.resource_type.clone();

    let lookups = async {
        tokio::join!(
            lookup(ctx, "compliance", &id, provider.check_compliance(&id, &ty)),
            lookup(ctx, "vulnerabilities", &id, provider.scan_vulnerabilities(&id, &ty)),
            lookup(ctx, "recommendations", &id, provider.recommendations(&id, &ty)),
        )
    };
    let (compliance, vulnerabilities, recommendations) = lookups.await;

    let mut attached = false;
    if let Some(compliance) = compliance {
        resource.compliance = compliance;
        attached = true;
    }
    if let Some(vulnerabilities) = vulnerabilities {
        resource.vulnerabilities = vulnerabilities;
        attached = true;
    }
    if let Some(recommendations) = recommendations {
        resource.recommendations = recommendations;
        attached = true;
    }
    attached
}

/// Best-effort detail lookup. Failures and cancellation both yield `None`.
async fn lookup<T>(
    ctx: &DiscoveryContext,
    detail: &'static str,
    resource_id: &str,
    fut: impl Future<Output = ProviderResult<T>>,
) -> Option<T> {
    match ctx.run(fut).await? {
        Ok(value) => Some(value),
        Err(ProviderError::Unsupported(_)) => None,
        Err(e) => {
            debug!(detail, resource_id, error = %e, "Detail lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::filter::{FilterSet, ResourceFilter};
    use crate::discovery::options::ResourceTypes;
    use crate::discovery::testing::{resources, StubProvider};
    use std::time::Duration;

    fn options(types: &[&str]) -> DiscoveryOptions {
        DiscoveryOptions::default()
            .resource_types(ResourceTypes::Only(types.iter().map(|t| t.to_string()).collect()))
            .retry(3, Duration::from_millis(100))
    }

    fn discoverer(stub: &Arc<StubProvider>, options: DiscoveryOptions) -> Discoverer {
        Discoverer::new(stub.clone(), options).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_filter_keeps_running_resources() {
        let stub = Arc::new(StubProvider::new("gcp").with_resources(
            "compute.instances",
            resources(
                "compute.instances",
                &["RUNNING", "STOPPED", "RUNNING", "STOPPED", "RUNNING"],
            ),
        ));
        let filters = FilterSet::new(vec![ResourceFilter::status_in(["RUNNING"])]).unwrap();
        let result = discoverer(&stub, options(&["compute.instances"]).filters(filters))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(result.resources.len(), 3);
        assert_eq!(result.summary.total_resources, 3);
        assert_eq!(result.summary.resources_by_status["RUNNING"], 3);
        assert!(result.resources.iter().all(|r| r.provider == "gcp"));
        assert!(!result.has_errors());
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_limit_caps_in_flight_calls() {
        let types = ["t1", "t2", "t3", "t4", "t5"];
        let mut stub = StubProvider::new("gcp").with_delay(Duration::from_millis(250));
        for ty in types {
            stub = stub.with_resources(ty, resources(ty, &["RUNNING"]));
        }
        let stub = Arc::new(stub);

        let result = discoverer(&stub, options(&types).max_workers(2))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(result.summary.total_resources, 5);
        assert_eq!(stub.max_in_flight(), 2);
        assert_eq!(stub.total_list_calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_resources("sql.instances", resources("sql.instances", &["RUNNABLE"]))
                .failing_list("sql.instances", 3, "503 Service Unavailable"),
        );
        let result = discoverer(&stub, options(&["sql.instances"]))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(stub.list_calls("sql.instances"), 4);
        assert_eq!(result.resources.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_failure_is_recorded_once() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_resources("iam.roles", resources("iam.roles", &["ACTIVE", "ACTIVE"]))
                .failing_list("kms.keyRings", 10, "permission denied"),
        );
        let result = discoverer(&stub, options(&["iam.roles", "kms.keyRings"]))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(stub.list_calls("kms.keyRings"), 1);
        assert_eq!(result.errors.len(), 1);
        let failure = &result.errors[0];
        assert_eq!(failure.provider, "gcp");
        assert_eq!(failure.resource_type.as_deref(), Some("kms.keyRings"));
        assert!(!failure.retryable);

        let metadata = result.metadata.unwrap();
        assert!((metadata.error_rate - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_are_flagged_retryable() {
        let stub = Arc::new(StubProvider::new("gcp").failing_list("pubsub.topics", 10, "rate limit exceeded"));
        let result = discoverer(&stub, options(&["pubsub.topics"]).retry(2, Duration::from_millis(10)))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(stub.list_calls("pubsub.topics"), 3);
        assert_eq!(result.retryable_errors().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_is_served_from_cache() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_resources("storage.buckets", resources("storage.buckets", &["READY", "READY", "READY"])),
        );
        let discoverer = discoverer(
            &stub,
            options(&["storage.buckets"]).cache(Duration::from_secs(60)),
        );

        let mut first = discoverer.discover(&DiscoveryContext::background()).await.resources;
        tokio::time::advance(Duration::from_secs(10)).await;
        let mut second = discoverer.discover(&DiscoveryContext::background()).await.resources;

        assert_eq!(stub.list_calls("storage.buckets"), 1);
        first.sort_by(|a, b| a.id.cmp(&b.id));
        second.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_cache_calls_provider_again() {
        let stub = Arc::new(
            StubProvider::new("gcp").with_resources("storage.buckets", resources("storage.buckets", &["READY"])),
        );
        let discoverer = discoverer(&stub, options(&["storage.buckets"]).cache(Duration::from_secs(5)));

        discoverer.discover(&DiscoveryContext::background()).await;
        tokio::time::advance(Duration::from_secs(6)).await;
        let result = discoverer.discover(&DiscoveryContext::background()).await;

        assert_eq!(stub.list_calls("storage.buckets"), 2);
        assert_eq!(result.resources.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_returns_partial_result_without_errors() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_delay(Duration::from_secs(30))
                .with_resources("compute.disks", resources("compute.disks", &["READY"])),
        );
        let (ctx, cancel) = DiscoveryContext::new();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            cancel.cancel();
        });

        let result = discoverer(&stub, options(&["compute.disks", "compute.networks"]))
            .discover(&ctx)
            .await;

        assert!(result.resources.is_empty());
        assert!(result.errors.is_empty());
        assert!(result.end_time.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_listed_provider_label_is_replaced_by_registered_name() {
        let labelled: Vec<Resource> = resources("storage.buckets", &["READY", "READY"])
            .into_iter()
            .map(|mut r| {
                r.provider = "gcp".to_string();
                r
            })
            .collect();
        let stub = Arc::new(StubProvider::new("gcp-prod").with_resources("storage.buckets", labelled));
        let discoverer = discoverer(&stub, options(&["storage.buckets"]).cache(Duration::from_secs(60)));

        let first = discoverer.discover(&DiscoveryContext::background()).await;
        let second = discoverer.discover(&DiscoveryContext::background()).await;

        assert_eq!(stub.list_calls("storage.buckets"), 1);
        assert_eq!(second.resources.len(), 2);
        for resource in first.resources.iter().chain(&second.resources) {
            assert_eq!(resource.provider, "gcp-prod");
        }
        assert_eq!(second.summary.resources_by_provider["gcp-prod"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hits_respect_the_reader_filters() {
        let stub = Arc::new(StubProvider::new("gcp").with_resources(
            "compute.instances",
            resources("compute.instances", &["RUNNING", "STOPPED", "RUNNING"]),
        ));
        let shared = Arc::new(ResourceCache::new(Duration::from_secs(60)));

        let unfiltered = discoverer(&stub, options(&["compute.instances"]))
            .with_cache(shared.clone())
            .discover(&DiscoveryContext::background())
            .await;
        assert_eq!(unfiltered.resources.len(), 3);

        let running = FilterSet::new(vec![ResourceFilter::status_in(["RUNNING"])]).unwrap();
        let filtered = discoverer(&stub, options(&["compute.instances"]).filters(running))
            .with_cache(shared)
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(stub.list_calls("compute.instances"), 1);
        assert_eq!(filtered.resources.len(), 2);
        assert!(filtered.resources.iter().all(|r| r.status == "RUNNING"));
        assert_eq!(filtered.summary.total_resources, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_keeps_finished_types() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_resources("compute.disks", resources("compute.disks", &["READY", "READY"]))
                .with_resources("compute.snapshots", resources("compute.snapshots", &["READY"]))
                .with_type_delay("compute.snapshots", Duration::from_secs(60)),
        );
        let (ctx, cancel) = DiscoveryContext::new();
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let cancelled_at = Utc::now();
            cancel.cancel();
            cancelled_at
        });

        let started = tokio::time::Instant::now();
        let result = discoverer(&stub, options(&["compute.disks", "compute.snapshots"]))
            .discover(&ctx)
            .await;
        let cancelled_at = canceller.await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(result.resources.len(), 2);
        assert!(result.resources.iter().all(|r| r.resource_type == "compute.disks"));
        assert!(result.errors.is_empty());
        assert!(result.resources.iter().all(|r| r.discovered_at <= cancelled_at));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_timeout_runs_to_completion() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_delay(Duration::from_secs(1))
                .with_resources("compute.disks", resources("compute.disks", &["READY"])),
        );
        let result = discoverer(&stub, options(&["compute.disks"]).timeout(Duration::from_secs(u64::MAX)))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(result.resources.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_bounds_the_whole_run() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_delay(Duration::from_secs(60))
                .with_resources("compute.disks", resources("compute.disks", &["READY"])),
        );
        let started = tokio::time::Instant::now();
        let result = discoverer(&stub, options(&["compute.disks"]).timeout(Duration::from_secs(5)))
            .discover(&DiscoveryContext::background())
            .await;

        assert!(started.elapsed() < Duration::from_secs(6));
        assert!(result.resources.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_empty_type_list_yields_empty_result() {
        let stub = Arc::new(StubProvider::new("gcp"));
        let result = discoverer(&stub, options(&[]))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(result.summary.total_resources, 0);
        assert!(result.errors.is_empty());
        assert_eq!(stub.total_list_calls(), 0);
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.error_rate, 0.0);
        assert!(metadata.first_resource_discovered.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deep_scan_attaches_details() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_details()
                .with_resources("compute.instances", resources("compute.instances", &["RUNNING", "RUNNING"])),
        );
        let result = discoverer(
            &stub,
            options(&["compute.instances"]).deep_scan(true).include_all_details(),
        )
        .discover(&DiscoveryContext::background())
        .await;

        assert_eq!(result.resources.len(), 2);
        for resource in &result.resources {
            assert_eq!(resource.tag("enriched"), Some(resource.id.as_str()));
            assert!(resource.cost.is_some());
            assert_eq!(resource.compliance.len(), 1);
            assert_eq!(resource.vulnerabilities.len(), 1);
            assert_eq!(resource.recommendations, vec!["rightsize to e2-small"]);
        }

        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.provider, "gcp");
        assert_eq!(metadata.project, "stub-project");
        let costs = metadata.cost_analysis.unwrap();
        assert_eq!(costs.total_monthly_cost, 60.0);
        assert_eq!(costs.estimated_annual_cost, 720.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deep_scan_failures_leave_fields_empty() {
        let stub = Arc::new(
            StubProvider::new("gcp")
                .with_resources("compute.instances", resources("compute.instances", &["RUNNING"])),
        );
        let result = discoverer(&stub, options(&["compute.instances"]).deep_scan(true))
            .discover(&DiscoveryContext::background())
            .await;

        assert_eq!(result.resources.len(), 1);
        assert!(result.errors.is_empty());
        let resource = &result.resources[0];
        assert!(resource.compliance.is_empty());
        assert!(resource.vulnerabilities.is_empty());
        assert!(resource.cost.is_none());
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let stub: Arc<dyn Provider> = Arc::new(StubProvider::new("gcp"));
        assert!(matches!(
            Discoverer::new(stub, DiscoveryOptions::default().max_workers(0)),
            Err(ConfigError::NotPositive { field: "max_workers" })
        ));
    }
}
