use dashmap::DashMap;
use moka::future::Cache;
use quill_events::EventBus;
use std::collections::HashSet;
use std::sync::Arc;

/// Resource name plus a rendering of the query parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Arc<str>,
    pub params: String,
}

/// Keyed cache of list responses, invalidated per resource after mutations
pub struct QueryCache<V: Clone + Send + Sync + 'static> {
    pub(super) enabled: bool,
    pub(super) entries: Cache<QueryKey, V>,
    /// Every key cached under a resource, so a mutation can drop all of them
    pub(super) index: DashMap<Arc<str>, HashSet<QueryKey>>,
    /// Bumped on invalidation; fetches started before a bump are not stored
    pub(super) generations: DashMap<Arc<str>, u64>,
    pub(super) events: Arc<EventBus>,
}
