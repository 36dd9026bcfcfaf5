//! Cached wrapper for provider API clients
//!
//! Provides transparent caching of provider responses in the session cache,
//! keyed by the active profile identity.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, RwLock};

use crate::cache::{CacheStore, KeyBuilder, ResourceKind};
use crate::client::models::{Bucket, BucketObject, IamUser, Instance, Queue};
use crate::client::ResourceProvider;
use crate::config::CacheConfig;
use crate::error::Result;

/// Cached wrapper for any `ResourceProvider` implementation.
///
/// Reads are served from the shared store while fresh; mutations invalidate
/// the keys they make stale. Cache can be disabled via `CacheConfig::enabled`.
pub struct CachedProvider<P: ResourceProvider> {
    inner: Arc<P>,
    cache: Option<Arc<CacheStore<Value>>>,
    keys: RwLock<Arc<KeyBuilder>>,
    config: CacheConfig,
}

impl<P: ResourceProvider> CachedProvider<P> {
    /// Create a new cached provider wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying provider client to wrap
    /// * `cache` - Process-wide store shared with other wrappers
    /// * `keys` - Key builder for the active identity
    /// * `config` - Cache settings (enable flag, TTL overrides)
    pub fn new(
        inner: P,
        cache: Arc<CacheStore<Value>>,
        keys: KeyBuilder,
        config: CacheConfig,
    ) -> Self {
        let cache = config.enabled.then_some(cache);
        Self {
            inner: Arc::new(inner),
            cache,
            keys: RwLock::new(Arc::new(keys)),
            config,
        }
    }

    /// Get the inner client
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Key builder for the active identity
    pub fn keys(&self) -> Arc<KeyBuilder> {
        self.keys
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Point subsequent requests at a new identity.
    ///
    /// Entries cached for the previous identity are not touched; their keys
    /// can no longer be produced and they age out through TTL and sweeping.
    pub fn switch_identity(&self, identity: impl Into<String>) {
        let next = Arc::new(KeyBuilder::new(identity));
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        log::info!(
            "Switching cache identity from '{}' to '{}'",
            keys.identity(),
            next.identity()
        );
        *keys = next;
    }

    /// Drop every cached entry of `kind` for the active identity
    pub fn refresh(&self, kind: ResourceKind) {
        let keys = self.keys();
        self.invalidate(&keys.list(kind));
        self.invalidate_prefix(&keys.kind_prefix(kind));
    }

    /// Try to get cached data.
    ///
    /// A value that does not deserialize as `T` counts as a miss.
    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.as_ref()?.get(key)?;
        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Store data in cache
    fn set_cached<T: Serialize>(&self, key: &str, data: &T, kind: ResourceKind) {
        let Some(ref cache) = self.cache else {
            return;
        };
        match serde_json::to_value(data) {
            Ok(value) => cache.set(key, value, self.config.ttl_for(kind)),
            Err(e) => log::warn!("Not caching {}: {}", key, e),
        }
    }

    fn invalidate(&self, key: &str) {
        if let Some(ref cache) = self.cache
            && cache.delete(key)
        {
            log::debug!("Cache invalidated: {}", key);
        }
    }

    fn invalidate_prefix(&self, prefix: &str) {
        if let Some(ref cache) = self.cache {
            let removed = cache.delete_prefix(prefix);
            if removed > 0 {
                log::debug!("Cache invalidated {} entries under {}", removed, prefix);
            }
        }
    }

    /// Serve `key` from cache, or run `fetch` and cache its result
    async fn cached<T, F, Fut>(&self, key: String, kind: ResourceKind, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get_cached(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(cached);
        }

        log::debug!("Cache miss: {}", key);
        let result = fetch().await?;
        self.set_cached(&key, &result, kind);
        Ok(result)
    }
}

#[async_trait]
impl<P: ResourceProvider + 'static> ResourceProvider for CachedProvider<P> {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let key = self.keys().list(ResourceKind::Buckets);
        self.cached(key, ResourceKind::Buckets, || self.inner.list_buckets())
            .await
    }

    async fn create_bucket(&self, name: &str) -> Result<Bucket> {
        // Keys of the identity the mutation was issued under
        let keys = self.keys();
        let result = self.inner.create_bucket(name).await?;
        self.invalidate(&keys.list(ResourceKind::Buckets));
        Ok(result)
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        let keys = self.keys();
        self.inner.delete_bucket(name).await?;
        self.invalidate(&keys.list(ResourceKind::Buckets));
        self.invalidate_prefix(&keys.scoped(ResourceKind::BucketObjects, name));
        Ok(())
    }

    async fn list_bucket_objects(&self, bucket: &str) -> Result<Vec<BucketObject>> {
        let key = self.keys().scoped(ResourceKind::BucketObjects, bucket);
        self.cached(key, ResourceKind::BucketObjects, || {
            self.inner.list_bucket_objects(bucket)
        })
        .await
    }

    async fn get_bucket_object(&self, bucket: &str, key: &str) -> Result<BucketObject> {
        let cache_key = self.keys().item(ResourceKind::BucketObjects, bucket, key);
        self.cached(cache_key, ResourceKind::BucketObjects, || {
            self.inner.get_bucket_object(bucket, key)
        })
        .await
    }

    async fn delete_bucket_object(&self, bucket: &str, key: &str) -> Result<()> {
        let keys = self.keys();
        self.inner.delete_bucket_object(bucket, key).await?;
        // Listing and the object's own entry share the bucket's prefix
        self.invalidate_prefix(&keys.scoped(ResourceKind::BucketObjects, bucket));
        Ok(())
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        let key = self.keys().list(ResourceKind::Instances);
        self.cached(key, ResourceKind::Instances, || self.inner.list_instances())
            .await
    }

    async fn list_users(&self) -> Result<Vec<IamUser>> {
        let key = self.keys().list(ResourceKind::Users);
        self.cached(key, ResourceKind::Users, || self.inner.list_users())
            .await
    }

    async fn list_queues(&self) -> Result<Vec<Queue>> {
        let key = self.keys().list(ResourceKind::Queues);
        self.cached(key, ResourceKind::Queues, || self.inner.list_queues())
            .await
    }
}
