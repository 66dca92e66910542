//! Remote table view-state controller
//!
//! Keeps the page and sort of a remotely paged table in a shareable query
//! string, derives fetch keys from it, and caches fetched pages so the view
//! keeps showing the previous rows while the next ones load.

pub mod cache;
pub mod error;
pub mod mock;
pub mod query;
pub mod response;
pub mod transport;
pub mod view;

mod table;

pub use response::QueryResult;
pub use table::*;
