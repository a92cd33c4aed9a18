//! Multi-Provider Discovery Engine
//!
//! Holds a registry of named providers and discovers accounts and their
//! resources across all of them concurrently.

use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::context::DiscoveryContext;
use super::error::{ConfigError, DiscoveryRunError};
use super::filter::{should_include_account, should_include_resource};
use super::options::DiscoveryConfig;
use super::provider::Provider;
use super::retry::{is_retryable_error, with_retry, RetryOutcome};
use super::types::{DiscoveryError, DiscoveryResult};

/// Named providers guarded by a single read-write lock
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn Provider>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`, returning any provider it replaced
    pub fn register(&self, name: impl Into<String>, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), provider)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Point-in-time copy of the registry, sorted by name
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn Provider>)> {
        let mut providers: Vec<(String, Arc<dyn Provider>)> = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, provider)| (name.clone(), provider.clone()))
            .collect();
        providers.sort_by(|a, b| a.0.cmp(&b.0));
        providers
    }

    pub fn len(&self) -> usize {
        self.providers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct DiscoveryEngine {
    registry: ProviderRegistry,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new(config: DiscoveryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: ProviderRegistry::new(),
            config,
        })
    }

    pub fn register_provider(&self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        let name = name.into();
        if self.registry.register(name.clone(), provider).is_some() {
            warn!(provider = %name, "Replaced existing provider registration");
        } else {
            info!(provider = %name, "Registered provider");
        }
    }

    /// Returns `true` if a provider was registered under `name`
    pub fn unregister_provider(&self, name: &str) -> bool {
        let removed = self.registry.unregister(name).is_some();
        if removed {
            info!(provider = %name, "Unregistered provider");
        }
        removed
    }

    pub fn provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.registry.get(name)
    }

    pub fn list_providers(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover every registered provider with the engine's configuration
    pub async fn discover_all(&self, ctx: &DiscoveryContext) -> Result<DiscoveryResult, DiscoveryRunError> {
        self.discover_all_with(ctx, &self.config).await
    }

    /// Discover every registered provider with a per-run configuration
    pub async fn discover_all_with(
        &self,
        ctx: &DiscoveryContext,
        config: &DiscoveryConfig,
    ) -> Result<DiscoveryResult, DiscoveryRunError> {
        config.validate()?;
        let providers = self.registry.snapshot();
        if providers.is_empty() {
            let mut partial = DiscoveryResult::start();
            partial.finish();
            return Err(DiscoveryRunError::NoProviders {
                partial: Box::new(partial),
            });
        }
        Ok(run_providers(ctx, config, providers, DiscoveryResult::start()).await)
    }

    pub async fn discover_provider(
        &self,
        ctx: &DiscoveryContext,
        name: &str,
    ) -> Result<DiscoveryResult, DiscoveryRunError> {
        let Some(provider) = self.registry.get(name) else {
            let mut partial = DiscoveryResult::start();
            partial.finish();
            return Err(DiscoveryRunError::ProviderNotFound {
                name: name.to_string(),
                partial: Box::new(partial),
            });
        };
        Ok(run_providers(ctx, &self.config, vec![(name.to_string(), provider)], DiscoveryResult::start()).await)
    }

    /// Discover the named providers. Unknown names are recorded as errors;
    /// an empty selection discovers everything.
    pub async fn discover_selected(
        &self,
        ctx: &DiscoveryContext,
        names: &[String],
    ) -> Result<DiscoveryResult, DiscoveryRunError> {
        if names.is_empty() {
            return self.discover_all(ctx).await;
        }

        let mut result = DiscoveryResult::start();
        let mut providers = Vec::new();
        for name in names {
            match self.registry.get(name) {
                Some(provider) => providers.push((name.clone(), provider)),
                None => {
                    warn!(provider = %name, "Selected provider is not registered");
                    result.add_error(DiscoveryError::new(name.as_str(), "provider not found", false));
                }
            }
        }

        Ok(run_providers(ctx, &self.config, providers, result).await)
    }
}

/// One task per provider, bounded by `max_concurrency`. Partials are merged
/// as tasks join, so only this function writes to `result`.
async fn run_providers(
    ctx: &DiscoveryContext,
    config: &DiscoveryConfig,
    providers: Vec<(String, Arc<dyn Provider>)>,
    mut result: DiscoveryResult,
) -> DiscoveryResult {
    info!(
        providers = providers.len(),
        max_concurrency = config.max_concurrency,
        "Starting multi-provider discovery"
    );

    let config = Arc::new(config.clone());
    let permits = Arc::new(Semaphore::new(config.max_concurrency));
    let mut tasks = JoinSet::new();

    for (name, provider) in providers {
        let ctx = ctx.clone();
        let config = config.clone();
        let permits = permits.clone();
        tasks.spawn(async move {
            let Some(Ok(_permit)) = ctx.run(permits.acquire_owned()).await else {
                return (name, Ok(DiscoveryResult::start()));
            };
            let provider_ctx = ctx.with_timeout(config.timeout);
            let outcome = AssertUnwindSafe(discover_one(&provider_ctx, &name, provider.as_ref(), &config))
                .catch_unwind()
                .await;
            (name, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(partial))) => result.merge(partial),
            Ok((name, Err(_))) => {
                error!(provider = %name, "Provider discovery panicked");
                result.add_error(DiscoveryError::new(name, "provider discovery panicked", false));
            }
            Err(e) => {
                error!(error = %e, "Provider task failed");
                result.add_error(DiscoveryError::new("", format!("provider task failed: {}", e), false));
            }
        }
    }

    result.finish();
    info!(
        accounts = result.summary.total_accounts,
        resources = result.summary.total_resources,
        errors = result.summary.error_count,
        duration_ms = result.duration.as_millis() as u64,
        "Multi-provider discovery complete"
    );
    result
}

/// Accounts, then resources per included account, for a single provider.
/// Everything collected is attributed to the registered `name`.
async fn discover_one(
    ctx: &DiscoveryContext,
    name: &str,
    provider: &dyn Provider,
    config: &DiscoveryConfig,
) -> DiscoveryResult {
    let mut partial = DiscoveryResult::start();
    let policy = config.retry_policy();

    let accounts = match with_retry(ctx, &policy, "discover_accounts", || provider.discover_accounts()).await {
        RetryOutcome::Success(accounts) => accounts,
        RetryOutcome::Failed { error, attempts } => {
            warn!(provider = %name, attempts, error = %error, "Failed to discover accounts");
            partial.add_error(DiscoveryError::new(
                name,
                format!("failed to discover accounts: {}", error),
                is_retryable_error(&error),
            ));
            return partial;
        }
        RetryOutcome::Cancelled => return partial,
    };
    debug!(provider = %name, accounts = accounts.len(), "Discovered accounts");

    for mut account in accounts {
        if !should_include_account(&config.account_rules, &account) {
            debug!(provider = %name, account = %account.id, "Account excluded by rules");
            continue;
        }
        account.provider = name.to_string();

        let outcome = with_retry(ctx, &policy, "discover_resources", || provider.discover_resources(&account)).await;
        let account_id = account.id.clone();
        partial.add_account(account);

        match outcome {
            RetryOutcome::Success(resources) => {
                for mut resource in resources {
                    if !should_include_resource(&config.resource_rules, &resource)
                        || !config.resource_filters.matches(&resource)
                    {
                        continue;
                    }
                    resource.provider = name.to_string();
                    partial.add_resource(resource);
                }
            }
            RetryOutcome::Failed { error, attempts } => {
                warn!(provider = %name, account = %account_id, attempts, error = %error, "Failed to discover resources");
                partial.add_error(
                    DiscoveryError::new(
                        name,
                        format!("failed to discover resources: {}", error),
                        is_retryable_error(&error),
                    )
                    .for_account(account_id),
                );
            }
            RetryOutcome::Cancelled => break,
        }
    }

    partial
}
