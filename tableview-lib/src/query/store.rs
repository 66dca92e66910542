//! Stores holding the persisted representation.

use url::Url;

use super::QueryParams;
use super::QueryPatch;

/// Backend trait for the persisted, shareable view representation.
///
/// Implementations hold a query string somewhere (memory, a URL, a browser
/// location) and expose it as [`QueryParams`]. Writes are merges: keys the
/// patch does not mention must survive.
pub trait QueryStore {
    /// Reads the current parameters.
    fn read(&self) -> QueryParams;

    /// Merges `patch` into the stored parameters.
    fn write(&mut self, patch: &QueryPatch);
}

impl<S: QueryStore + ?Sized> QueryStore for &mut S {
    fn read(&self) -> QueryParams {
        (**self).read()
    }

    fn write(&mut self, patch: &QueryPatch) {
        (**self).write(patch)
    }
}

/// A store keeping the parameters in memory.
///
/// # Example
///
/// ```
/// use tableview_lib::query::{MemoryStore, QueryPatch, QueryStore};
///
/// let mut store = MemoryStore::parse("tab=cars");
/// store.write(&QueryPatch::new().set("page", "1"));
/// assert_eq!(store.read().to_query_string(), "tab=cars&page=1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    params: QueryParams,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from existing parameters.
    pub fn with_params(params: QueryParams) -> Self {
        Self { params }
    }

    /// Creates a store from a query string.
    pub fn parse(query: &str) -> Self {
        Self::with_params(QueryParams::parse(query))
    }

    /// Returns the stored parameters.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

impl QueryStore for MemoryStore {
    fn read(&self) -> QueryParams {
        self.params.clone()
    }

    fn write(&mut self, patch: &QueryPatch) {
        patch.apply(&mut self.params);
    }
}

/// A store backed by the query component of a URL.
#[derive(Debug, Clone)]
pub struct UrlStore {
    url: Url,
}

impl UrlStore {
    /// Wraps a URL.
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Returns the URL, including the current view state.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl QueryStore for UrlStore {
    fn read(&self) -> QueryParams {
        QueryParams::parse(self.url.query().unwrap_or_default())
    }

    fn write(&mut self, patch: &QueryPatch) {
        let mut params = self.read();
        patch.apply(&mut params);

        if params.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&params.to_query_string()));
        }
    }
}
