//! Remote data cache
//!
//! Keeps one [`CacheEntry`] per [`FetchKey`](crate::view::FetchKey) with an
//! explicit [`EntryStatus`], coalesces identical in-flight requests, and
//! serves the previously shown rows as stale placeholder data while a new
//! key loads.

mod config;
mod entry;
mod remote;

pub use config::*;
pub use entry::*;
pub use remote::*;
