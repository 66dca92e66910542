//! Cache entries

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::error::FetchError;
use crate::view::FetchKey;

/// Lifecycle of a cache entry.
///
/// Entries start `Pending` and settle into `Resolved` or `Failed`. A refetch
/// moves a settled entry back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// A fetch is in flight.
    Pending,
    /// The last fetch succeeded.
    Resolved,
    /// The last fetch failed.
    Failed,
}

/// Everything the cache knows about one key.
#[derive(Debug)]
pub struct CacheEntry<R> {
    pub(super) key: FetchKey,
    pub(super) status: EntryStatus,
    pub(super) data: Option<Arc<[R]>>,
    pub(super) error: Option<Arc<FetchError>>,
    pub(super) requested_at: u64,
    pub(super) fetched_at: Option<u64>,
    pub(super) updated_at: Option<DateTime<Utc>>,
    pub(super) last_used: u64,
    pub(super) generation: u64,
}

impl<R> CacheEntry<R> {
    pub(super) fn pending(key: FetchKey, tick: u64) -> Self {
        Self {
            key,
            status: EntryStatus::Pending,
            data: None,
            error: None,
            requested_at: tick,
            fetched_at: None,
            updated_at: None,
            last_used: tick,
            generation: 0,
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    /// Returns the status.
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Returns the rows of the last successful fetch.
    ///
    /// Kept while a refetch is pending or after it failed.
    pub fn data(&self) -> Option<&[R]> {
        self.data.as_deref()
    }

    /// Returns the error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_deref()
    }

    /// Logical time the current fetch was issued.
    pub fn requested_at(&self) -> u64 {
        self.requested_at
    }

    /// Logical time the data was stored.
    pub fn fetched_at(&self) -> Option<u64> {
        self.fetched_at
    }

    /// Wall-clock time the data was stored.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub(super) fn placeholder(&self) -> Option<(FetchKey, Arc<[R]>)> {
        self.data.clone().map(|data| (self.key.clone(), data))
    }
}
