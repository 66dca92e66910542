//! Error types

mod fetch;
mod server;

pub use fetch::*;
pub use server::*;

/// Top-level error for fallible operations in this crate.
///
/// Decoding the persisted representation and out-of-range page transitions
/// never fail; they degrade to defaults or no-ops instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fetch against the backend failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The mock server failed.
    #[error(transparent)]
    Server(#[from] ServerError),
}
