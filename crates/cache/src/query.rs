use super::models::{QueryCache, QueryKey};
use moka::future::Cache;
use quill_config::CacheSettings;
use quill_events::{AppEvent, EventBus};
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

impl QueryKey {
    pub fn new(resource: &str, params: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: params.into(),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> QueryCache<V> {
    pub fn new(settings: &CacheSettings, events: Arc<EventBus>) -> Self {
        let entries = Cache::builder()
            .max_capacity(settings.max_entries)
            .time_to_live(Duration::from_secs(settings.ttl_secs))
            .build();

        Self {
            enabled: settings.enabled,
            entries,
            index: DashMap::new(),
            generations: DashMap::new(),
            events,
        }
    }

    /// Returns the cached value or runs `fetch` and stores a successful result.
    /// Errors are never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: QueryKey, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if !self.enabled {
            return fetch().await;
        }

        if let Some(value) = self.entries.get(&key).await {
            tracing::debug!("Cache hit: {}?{}", key.resource, key.params);
            return Ok(value);
        }

        let generation = self.generation(&key.resource);
        let value = fetch().await?;
        self.store(key, value.clone(), generation).await;

        Ok(value)
    }

    /// Index and insert first, then compare generations: an invalidation
    /// either bumped the counter before the check or finds the key in the
    /// index afterwards.
    async fn store(&self, key: QueryKey, value: V, generation: u64) {
        self.index
            .entry(Arc::clone(&key.resource))
            .or_default()
            .insert(key.clone());
        self.entries.insert(key.clone(), value).await;

        if self.generation(&key.resource) != generation {
            tracing::debug!("Discarding stale fetch for {}", key.resource);
            self.entries.invalidate(&key).await;
        }
    }

    /// Drops every cached query of a resource
    pub async fn invalidate_resource(&self, resource: &str) {
        *self.generations.entry(resource.into()).or_insert(0) += 1;

        let keys = self
            .index
            .remove(resource)
            .map(|(_, keys)| keys)
            .unwrap_or_default();

        for key in &keys {
            self.entries.invalidate(key).await;
        }

        tracing::debug!("Invalidated {} cached queries for {}", keys.len(), resource);
        self.events.emit(AppEvent::CacheInvalidated {
            resource: resource.to_string(),
        });
    }

    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    fn generation(&self, resource: &str) -> u64 {
        self.generations.get(resource).map(|g| *g).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn settings(enabled: bool) -> CacheSettings {
        CacheSettings {
            enabled,
            ttl_secs: 60,
            max_entries: 100,
        }
    }

    async fn counted(counter: &AtomicUsize, value: u32) -> Result<u32, String> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_second_read_served_from_cache() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), EventBus::new(true));
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new("files", "page=1");

        assert_eq!(cache.get_or_fetch(key.clone(), || counted(&calls, 1)).await, Ok(1));
        assert_eq!(cache.get_or_fetch(key, || counted(&calls, 2)).await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), EventBus::new(true));
        let calls = AtomicUsize::new(0);
        let page1 = QueryKey::new("files", "page=1");
        let page2 = QueryKey::new("files", "page=2");
        let other = QueryKey::new("posts", "page=1");

        cache.get_or_fetch(page1.clone(), || counted(&calls, 1)).await.unwrap();
        cache.get_or_fetch(page2.clone(), || counted(&calls, 2)).await.unwrap();
        cache.get_or_fetch(other.clone(), || counted(&calls, 3)).await.unwrap();

        cache.invalidate_resource("files").await;

        assert_eq!(cache.get_or_fetch(page1, || counted(&calls, 10)).await, Ok(10));
        assert_eq!(cache.get_or_fetch(page2, || counted(&calls, 20)).await, Ok(20));
        assert_eq!(cache.get_or_fetch(other, || counted(&calls, 30)).await, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), EventBus::new(true));
        let key = QueryKey::new("files", "");

        let failed: Result<u32, String> = cache
            .get_or_fetch(key.clone(), || async { Err("boom".to_string()) })
            .await;
        assert!(failed.is_err());

        let calls = AtomicUsize::new(0);
        assert_eq!(cache.get_or_fetch(key, || counted(&calls, 4)).await, Ok(4));
    }

    #[tokio::test]
    async fn test_fetch_racing_invalidation_is_not_stored() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), EventBus::new(true));
        let key = QueryKey::new("files", "");

        let value = cache
            .get_or_fetch(key.clone(), || async {
                cache.invalidate_resource("files").await;
                Ok::<_, String>(1)
            })
            .await;
        assert_eq!(value, Ok(1));

        let calls = AtomicUsize::new(0);
        assert_eq!(cache.get_or_fetch(key, || counted(&calls, 2)).await, Ok(2));
    }

    #[tokio::test]
    async fn test_store_after_invalidation_leaves_nothing_cached() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), EventBus::new(true));
        let key = QueryKey::new("files", "page=1");
        let started = cache.generation("files");

        cache.invalidate_resource("files").await;
        cache.store(key.clone(), 1, started).await;

        assert_eq!(cache.entries.get(&key).await, None);
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_passes_through() {
        let cache: QueryCache<u32> = QueryCache::new(&settings(false), EventBus::new(true));
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new("files", "");

        cache.get_or_fetch(key.clone(), || counted(&calls, 1)).await.unwrap();
        cache.get_or_fetch(key, || counted(&calls, 1)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidation_emits_event() {
        let events = EventBus::new(true);
        let mut rx = events.subscribe();
        let cache: QueryCache<u32> = QueryCache::new(&settings(true), events);

        cache.invalidate_resource("files").await;
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::CacheInvalidated { resource: "files".to_string() }
        );
    }
}
