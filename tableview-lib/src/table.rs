//! A controller and a cache wired together.

use crate::cache::CacheConfig;
use crate::cache::RemoteCache;
use crate::query::QueryStore;
use crate::response::QueryResult;
use crate::transport::Transport;
use crate::view::TableConfig;
use crate::view::ViewController;
use crate::view::ViewState;

/// A remotely paged, sortable table.
///
/// Transitions go through [`controller_mut`](Self::controller_mut) and only
/// touch the store. The next [`view`](Self::view) derives the fetch key from
/// the store and asks the cache for it.
///
/// # Example
///
/// ```ignore
/// let mut table = RemoteTable::new(
///     MemoryStore::new(),
///     MockTransport::new(service),
///     TableConfig::default(),
/// );
///
/// table.controller_mut().toggle_sort("name");
/// let result = table.view();
/// ```
#[derive(Debug)]
pub struct RemoteTable<S, T: Transport> {
    controller: ViewController<S>,
    cache: RemoteCache<T>,
}

impl<S: QueryStore, T: Transport> RemoteTable<S, T> {
    /// Creates a table with an unbounded cache.
    pub fn new(store: S, transport: T, config: TableConfig) -> Self {
        Self::with_cache_config(store, transport, config, CacheConfig::default())
    }

    /// Creates a table with a configured cache.
    pub fn with_cache_config(
        store: S,
        transport: T,
        config: TableConfig,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            controller: ViewController::new(store, config),
            cache: RemoteCache::with_config(transport, cache_config),
        }
    }

    /// Reads the store and returns what to show for it.
    ///
    /// Must be called within a tokio runtime.
    pub fn view(&mut self) -> QueryResult<T::Row> {
        let key = self.controller.fetch_key();
        self.cache.request(key)
    }

    /// Returns the decoded view state.
    pub fn state(&self) -> ViewState {
        self.controller.state()
    }

    /// Returns the controller.
    pub fn controller(&self) -> &ViewController<S> {
        &self.controller
    }

    /// Returns the controller for transitions.
    pub fn controller_mut(&mut self) -> &mut ViewController<S> {
        &mut self.controller
    }

    /// Returns the cache.
    pub fn cache(&self) -> &RemoteCache<T> {
        &self.cache
    }

    /// Returns the cache mutably.
    pub fn cache_mut(&mut self) -> &mut RemoteCache<T> {
        &mut self.cache
    }

    /// Waits until no fetch is in flight.
    pub async fn settle(&mut self) {
        self.cache.settle().await
    }
}
