//! View state and the transitions over it.
//!
//! - [`ViewState`] - page index plus an optional single-column sort
//! - [`codec`] - persisted parameters to and from [`ViewState`]
//! - [`FetchKey`] - the request identity derived from a [`ViewState`]
//! - [`ViewController`] - page and sort transitions written back to a store

pub mod codec;
mod config;
mod controller;
mod key;
mod state;
mod update;

pub use config::TableConfig;
pub use controller::ViewController;
pub use controller::next_sort;
pub use key::FetchKey;
pub use key::build_key;
pub use key::FETCH_DIRECTION_PARAM;
pub use key::FETCH_PAGE_PARAM;
pub use key::FETCH_SORT_PARAM;
pub use state::ColumnSort;
pub use state::Direction;
pub use state::ViewState;
pub use update::Update;
