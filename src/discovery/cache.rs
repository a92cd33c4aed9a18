//! Resource Cache
//!
//! TTL-indexed copies of discovered resources, keyed by provider, type and id.
//! Expired entries are evicted lazily by reads; there is no background sweep.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::options::DEFAULT_CACHE_TTL;
use super::types::{Resource, ResourceKey};

#[derive(Debug, Clone)]
pub struct CachedResource {
    pub resource: Resource,
    pub cached_at: Instant,
    /// `None` when the TTL reaches past the clock's range
    pub expires_at: Option<Instant>,
}

impl CachedResource {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug)]
pub struct ResourceCache {
    entries: RwLock<HashMap<ResourceKey, CachedResource>>,
    ttl: Duration,
}

impl ResourceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// All unexpired resources of `resource_type`. Every expired entry seen
    /// during the scan is removed.
    pub fn get(&self, resource_type: &str) -> Vec<Resource> {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let before = entries.len();
        entries.retain(|_, cached| !cached.is_expired(now));
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, "Evicted expired cache entries");
        }

        entries
            .values()
            .filter(|cached| cached.resource.resource_type == resource_type)
            .map(|cached| cached.resource.clone())
            .collect()
    }

    /// Insert or overwrite the entry for this resource's identity
    pub fn put(&self, resource: Resource) {
        let now = Instant::now();
        let entry = CachedResource {
            expires_at: now.checked_add(self.ttl),
            cached_at: now,
            resource,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry.resource.identity(), entry);
    }

    /// Number of stored entries, including ones that expired but were not yet read
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
