//! The persisted, shareable representation of a view.
//!
//! View state lives in a URL-like query string so it can be bookmarked and
//! shared. [`QueryParams`] models the string, [`QueryPatch`] models a
//! non-destructive change to it, and [`QueryStore`] abstracts where it lives.

mod params;
mod store;

pub use params::PatchOp;
pub use params::QueryParams;
pub use params::QueryPatch;
pub use store::MemoryStore;
pub use store::QueryStore;
pub use store::UrlStore;
