//! Fetch transports.
//!
//! A [`Transport`] turns a [`FetchKey`] into rows. The cache only ever talks
//! to this trait, so the backend can be a real HTTP endpoint
//! ([`HttpTransport`]) or an in-process service ([`MockTransport`]).

mod http;
mod mock;

pub use http::*;
pub use mock::MockTransport;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::view::FetchKey;

/// Trait for fetch transports.
///
/// Implementations are shared with spawned fetch tasks, so they must be
/// `Send + Sync + 'static`.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// The row type returned by the backend.
    type Row: Send + Sync + 'static;

    /// Fetches the rows identified by `key`.
    async fn fetch(&self, key: &FetchKey) -> Result<Vec<Self::Row>, FetchError>;
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    type Row = T::Row;

    async fn fetch(&self, key: &FetchKey) -> Result<Vec<Self::Row>, FetchError> {
        (**self).fetch(key).await
    }
}
