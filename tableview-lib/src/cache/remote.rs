//! Stale-while-revalidate cache over a [`Transport`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use log::trace;
use log::warn;
use tokio::sync::mpsc;

use crate::error::FetchError;
use crate::response::QueryResult;
use crate::transport::Transport;
use crate::view::FetchKey;

use super::CacheConfig;
use super::CacheEntry;
use super::EntryStatus;

struct Completion<R> {
    key: FetchKey,
    generation: u64,
    result: Result<Vec<R>, FetchError>,
}

/// Caches fetched rows per [`FetchKey`] and never leaves the view blank.
///
/// The cache is owned by a single control thread. [`request`](Self::request)
/// is synchronous: it answers from the entries and, on a miss, spawns the
/// fetch on the tokio runtime. Finished fetches come back over a channel and
/// are applied only by the owner, on the next `request` or through
/// [`next_completion`](Self::next_completion) / [`settle`](Self::settle).
///
/// The last requested key is the current key. A result arriving for any
/// other key is stored but never becomes the displayed data.
///
/// # Example
///
/// ```ignore
/// let mut cache = RemoteCache::new(MockTransport::new(service));
///
/// let result = cache.request(FetchKey::page(0));
/// assert!(result.is_loading());
///
/// cache.settle().await;
/// let result = cache.request(FetchKey::page(0));
/// assert!(result.is_fresh());
/// ```
pub struct RemoteCache<T: Transport> {
    transport: Arc<T>,
    config: CacheConfig,
    entries: HashMap<FetchKey, CacheEntry<T::Row>>,
    current: Option<FetchKey>,
    displayed: Option<FetchKey>,
    clock: u64,
    completions_tx: mpsc::UnboundedSender<Completion<T::Row>>,
    completions_rx: mpsc::UnboundedReceiver<Completion<T::Row>>,
}

impl<T: Transport> RemoteCache<T> {
    /// Creates an unbounded cache over `transport`.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, CacheConfig::default())
    }

    /// Creates a cache with the given configuration.
    pub fn with_config(transport: T, config: CacheConfig) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            transport: Arc::new(transport),
            config,
            entries: HashMap::new(),
            current: None,
            displayed: None,
            clock: 0,
            completions_tx,
            completions_rx,
        }
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Makes `key` current and returns what to show for it.
    ///
    /// Starts a fetch if the key has never been requested. Requests for a
    /// key that is already pending share the in-flight fetch. Failed keys
    /// are not retried here; see [`refetch`](Self::refetch).
    ///
    /// Must be called within a tokio runtime.
    pub fn request(&mut self, key: FetchKey) -> QueryResult<T::Row> {
        self.poll_completions();
        self.current = Some(key.clone());

        let tick = self.tick();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.last_used = tick;
                if entry.status == EntryStatus::Resolved {
                    self.displayed = Some(key.clone());
                }
            }
            None => self.start_fetch(key.clone()),
        }

        self.evict();
        self.result_for(&key)
    }

    /// Re-issues the fetch for `key` unless one is already in flight.
    ///
    /// Existing data stays available as the placeholder. Returns `true` if a
    /// fetch was started.
    pub fn refetch(&mut self, key: &FetchKey) -> bool {
        self.poll_completions();
        if self
            .entries
            .get(key)
            .is_some_and(|entry| entry.status == EntryStatus::Pending)
        {
            return false;
        }
        self.start_fetch(key.clone());
        true
    }

    /// Returns what to show for the current key without side effects.
    ///
    /// Completions that have not been applied yet are not reflected.
    pub fn current_result(&self) -> Option<QueryResult<T::Row>> {
        self.current.as_ref().map(|key| self.result_for(key))
    }

    /// Returns the current (most recently requested) key.
    pub fn current(&self) -> Option<&FetchKey> {
        self.current.as_ref()
    }

    /// Returns the key whose data was last shown as fresh.
    pub fn displayed(&self) -> Option<&FetchKey> {
        self.displayed.as_ref()
    }

    /// Returns the entry for `key`.
    pub fn entry(&self, key: &FetchKey) -> Option<&CacheEntry<T::Row>> {
        self.entries.get(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of fetches in flight.
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.status == EntryStatus::Pending)
            .count()
    }

    /// Returns `true` if any fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.pending_count() > 0
    }

    /// Applies every completion that has already arrived.
    ///
    /// Returns the number applied.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Waits for the next fetch to finish and applies it.
    ///
    /// Returns the key it was for, or `None` if nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<FetchKey> {
        if !self.is_fetching() {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        let key = completion.key.clone();
        self.apply(completion);
        Some(key)
    }

    /// Waits until no fetch is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn start_fetch(&mut self, key: FetchKey) {
        let tick = self.tick();
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::pending(key.clone(), tick));

        entry.status = EntryStatus::Pending;
        entry.error = None;
        entry.requested_at = tick;
        entry.last_used = tick;
        entry.generation += 1;
        let generation = entry.generation;

        debug!("Fetching {} (generation {})", key, generation);

        let transport = self.transport.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = transport.fetch(&key).await;
            // the receiver only goes away with the cache
            let _ = tx.send(Completion {
                key,
                generation,
                result,
            });
        });
    }

    fn apply(&mut self, completion: Completion<T::Row>) {
        let tick = self.tick();
        let Completion {
            key,
            generation,
            result,
        } = completion;

        let Some(entry) = self.entries.get_mut(&key) else {
            trace!("Dropping result for evicted {}", key);
            return;
        };
        if entry.generation != generation || entry.status != EntryStatus::Pending {
            trace!("Dropping superseded result for {}", key);
            return;
        }

        match result {
            Ok(rows) => {
                debug!("Resolved {} with {} rows", key, rows.len());
                entry.status = EntryStatus::Resolved;
                entry.data = Some(Arc::from(rows));
                entry.fetched_at = Some(tick);
                entry.updated_at = Some(Utc::now());

                if self.current.as_ref() == Some(&key) {
                    self.displayed = Some(key);
                }
            }
            Err(e) => {
                warn!("Fetch for {} failed: {}", key, e);
                entry.status = EntryStatus::Failed;
                entry.error = Some(Arc::new(e));
            }
        }
    }

    fn result_for(&self, key: &FetchKey) -> QueryResult<T::Row> {
        let Some(entry) = self.entries.get(key) else {
            return QueryResult::placeholder(key.clone(), EntryStatus::Pending, None, None);
        };

        match (entry.status, &entry.data) {
            (EntryStatus::Resolved, Some(data)) => QueryResult::fresh(key.clone(), data.clone()),
            (status, _) => QueryResult::placeholder(
                key.clone(),
                status,
                self.placeholder_for(entry),
                entry.error.clone(),
            ),
        }
    }

    /// Own data from before a refetch, else the displayed key's data, else
    /// the most recently stored data of any key.
    fn placeholder_for(&self, entry: &CacheEntry<T::Row>) -> Option<(FetchKey, Arc<[T::Row]>)> {
        entry
            .placeholder()
            .or_else(|| {
                self.displayed
                    .as_ref()
                    .and_then(|key| self.entries.get(key))
                    .and_then(CacheEntry::placeholder)
            })
            .or_else(|| {
                self.entries
                    .values()
                    .filter(|e| e.data.is_some())
                    .max_by_key(|e| e.fetched_at)
                    .and_then(CacheEntry::placeholder)
            })
    }

    fn evict(&mut self) {
        let Some(max_entries) = self.config.max_entries else {
            return;
        };

        while self.entries.len() > max_entries {
            let victim = self
                .entries
                .values()
                .filter(|e| e.status != EntryStatus::Pending)
                .filter(|e| Some(&e.key) != self.current.as_ref())
                .filter(|e| Some(&e.key) != self.displayed.as_ref())
                .min_by_key(|e| e.last_used)
                .map(|e| e.key.clone());

            match victim {
                Some(key) => {
                    trace!("Evicting {}", key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl<T: Transport> std::fmt::Debug for RemoteCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCache")
            .field("entries", &self.entries.len())
            .field("current", &self.current)
            .field("displayed", &self.displayed)
            .field("config", &self.config)
            .finish()
    }
}
