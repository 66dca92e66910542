//! Cache configuration

/// Configuration for the remote data cache.
///
/// Entries are kept indefinitely by default. A cap bounds the number of
/// entries by evicting the least recently requested settled entry.
///
/// # Example
///
/// ```
/// use tableview_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_max_entries(50);
/// assert_eq!(config.max_entries, Some(50));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Maximum number of entries kept, if bounded.
    ///
    /// Pending entries, the current key and the displayed key are never
    /// evicted, so the cache may briefly exceed the cap.
    ///
    /// Default: unbounded
    pub max_entries: Option<usize>,
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the number of entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}
