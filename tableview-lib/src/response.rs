//! Presentation-facing cache results

use std::sync::Arc;

use crate::cache::EntryStatus;
use crate::error::FetchError;
use crate::view::FetchKey;

/// What the view should show for a requested key.
///
/// Carries either fresh data for the key, or stale placeholder data from
/// another key while the requested one is loading or has failed.
///
/// # Example
///
/// ```ignore
/// let result = cache.request(key);
///
/// if result.is_loading() {
///     println!("Loading...");
/// }
/// if let Some(error) = result.error() {
///     println!("Showing stale data: {}", error);
/// }
/// for row in result.rows() {
///     render(row);
/// }
/// ```
#[derive(Debug)]
pub struct QueryResult<R> {
    key: FetchKey,
    status: EntryStatus,
    data: Option<Arc<[R]>>,
    data_key: Option<FetchKey>,
    is_loading: bool,
    error: Option<Arc<FetchError>>,
}

impl<R> Clone for QueryResult<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            status: self.status,
            data: self.data.clone(),
            data_key: self.data_key.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}

impl<R> QueryResult<R> {
    /// Creates a result carrying fresh data for `key`.
    pub(crate) fn fresh(key: FetchKey, data: Arc<[R]>) -> Self {
        Self {
            data_key: Some(key.clone()),
            key,
            status: EntryStatus::Resolved,
            data: Some(data),
            is_loading: false,
            error: None,
        }
    }

    /// Creates a result for a key without fresh data.
    ///
    /// `placeholder` is the data shown meanwhile and the key it belongs to.
    pub(crate) fn placeholder(
        key: FetchKey,
        status: EntryStatus,
        placeholder: Option<(FetchKey, Arc<[R]>)>,
        error: Option<Arc<FetchError>>,
    ) -> Self {
        let (data_key, data) = placeholder.unzip();
        Self {
            key,
            status,
            data,
            data_key,
            is_loading: status == EntryStatus::Pending,
            error,
        }
    }

    /// Returns the requested key.
    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    /// Returns the status of the requested key's entry.
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Returns the data to show, if any.
    pub fn data(&self) -> Option<&[R]> {
        self.data.as_deref()
    }

    /// Returns the data to show, or an empty slice.
    pub fn rows(&self) -> &[R] {
        self.data().unwrap_or_default()
    }

    /// Returns the key the shown data was fetched for.
    pub fn data_key(&self) -> Option<&FetchKey> {
        self.data_key.as_ref()
    }

    /// Returns `true` if the shown data belongs to the requested key and is
    /// up to date.
    pub fn is_fresh(&self) -> bool {
        self.status == EntryStatus::Resolved
    }

    /// Returns `true` if data is shown but it is not the requested key's
    /// current data.
    pub fn is_stale(&self) -> bool {
        self.data.is_some() && !self.is_fresh()
    }

    /// Returns `true` while a fetch for the requested key is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns `true` if the last fetch for the requested key failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the error of the last failed fetch for the requested key.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_deref()
    }
}
